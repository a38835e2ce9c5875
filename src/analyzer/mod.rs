use crate::{
    errors::SegmentErr,
    morph::{orthography::x_notation, tags::MarkovTag},
    EsperantoSegmenter, Segmented,
};
use smallstr::SmallString;
use smallvec::SmallVec;
use std::cmp::Ordering;
use tracing::debug;

// Значения для Small-хранения поверхностей морфем, тегов узла и контекстов.
// Нынешние значения вычислены по словарям EsperantoWordSegmenter
// и могут меняться при дальнейших экспериментах.

/// Количество байт, которое вмещает в себя большую часть поверхностей морфем,
/// чтобы не аллоцировать под небольшой размер данных место на куче.
pub const SMALLMORF: usize = 8;
/// Количество тегов, которое вмещает большую часть наборов тегов узла дерева.
pub const SMALLTAG: usize = 4;
/// Количество классов правил, которое вмещает наборы классов узла дерева.
pub const SMALLRULE: usize = 4;
/// Количество тегов, которое вмещает большую часть последовательностей
/// тегов разбиения.
pub const SMALLSEQ: usize = 8;
/// Максимальный порядок модели: контексты не длиннее триграммы.
pub const SMALLGRAM: usize = 3;

/// Сборка марковской модели.
pub(crate) mod markov;
pub use markov::MarkovModel;

/// Префиксное дерево морфем с поиском разбиений по правилам.
pub(crate) mod trie;
pub use trie::{MorphemeTrie, TrieNode};

pub mod pretty_display;

/// Поверхность одной морфемы в x-нотации.
pub type Morpheme = SmallString<[u8; SMALLMORF]>;
/// Разбиение слова: упорядоченный список поверхностей,
/// конкатенация которых равна слову.
pub type Segmentation = Vec<Morpheme>;
/// Последовательность тегов разбиения, по одному на морфему.
pub type TagSeq = SmallVec<[MarkovTag; SMALLSEQ]>;
/// Контекст таблицы переходов: ровно n предыдущих состояний.
pub type Context = SmallVec<[MarkovTag; SMALLGRAM]>;

#[derive(Debug, Clone, Copy, PartialEq)]
/// Оценка последовательности тегов: произведение вероятностей переходов
/// и штраф за отсутствующие переходы. Сравнение лексикографическое,
/// больше - лучше.
pub struct Score {
    pub score: f64,
    pub zero_penalty: i32,
}

impl Score {
    /// Нижняя граница, которую превосходит любая настоящая оценка.
    pub(crate) const FLOOR: Score = Score {
        score: -1.0,
        zero_penalty: 0,
    };
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(
            self.score
                .total_cmp(&other.score)
                .then(self.zero_penalty.cmp(&other.zero_penalty)),
        )
    }
}

#[derive(Debug, Clone)]
/// Один оцененный кандидат: разбиение, выбор тегов и оценка.
pub struct ScoredSegmentation {
    pub segmentation: Segmentation,
    pub tags: TagSeq,
    pub score: Score,
}

/// Из набора разбиений выбирает максимальное по паре
/// (число морфем, само разбиение). Пустой набор дает пустое разбиение.
pub fn maximal_match(segmentations: Vec<Segmentation>) -> Segmentation {
    segmentations
        .into_iter()
        .max_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
        .unwrap_or_default()
}

/// Основная функциональность: разбиение слова на морфемы,
/// перебор совместимых тегов и выбор лучшего кандидата.
impl EsperantoSegmenter {
    /// Все легальные разбиения слова в x-нотации нижнего регистра.
    pub(crate) fn legal_segmentations(&self, word: &str) -> Vec<Segmentation> {
        let notated = x_notation(&word.to_lowercase());
        self.trie.find_morphemes(&notated, self.ignore_rules)
    }

    /// Полный конвейер: разбиения -> все расстановки тегов -> оценка ->
    /// накопление кандидатов с максимальной оценкой -> максимальное
    /// совпадение среди них.
    pub(crate) fn segment_word(&self, word: &str) -> Result<Segmented, SegmentErr> {
        let solutions = self.legal_segmentations(word);
        if solutions.is_empty() {
            debug!("{word} не имеет легальных разбиений");
            return Ok(Segmented::empty(word));
        }

        let mut best_so_far = Score::FLOOR;
        let mut best_solutions: Vec<Segmentation> = Vec::new();
        for solution in &solutions {
            for tagging in self.trie.all_taggings(solution)? {
                let scored = self.markov.score(&tagging);
                if best_so_far <= scored {
                    if best_so_far < scored {
                        best_so_far = scored;
                        best_solutions.clear();
                    }
                    best_solutions.push(solution.clone());
                }
            }
        }

        let winner = maximal_match(best_solutions);
        Ok(Segmented::from_segmentation(word, &winner))
    }

    /// Все оцененные кандидаты слова, лучшие впереди.
    pub(crate) fn segment_word_ranked(
        &self,
        word: &str,
    ) -> Result<Vec<ScoredSegmentation>, SegmentErr> {
        let mut candidates = Vec::new();
        for solution in self.legal_segmentations(word) {
            for tagging in self.trie.all_taggings(&solution)? {
                let score = self.markov.score(&tagging);
                candidates.push(ScoredSegmentation {
                    segmentation: solution.clone(),
                    tags: tagging,
                    score,
                });
            }
        }

        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.segmentation.cmp(&a.segmentation))
                .then_with(|| b.tags.cmp(&a.tags))
        });

        Ok(candidates)
    }

    /// Разбиение без марковской модели: просто максимальное совпадение
    /// по всем легальным разбиениям.
    pub(crate) fn segment_word_max_match(&self, word: &str) -> Segmented {
        let winner = maximal_match(self.legal_segmentations(word));
        Segmented::from_segmentation(word, &winner)
    }

    /// Все легальные разбиения без выбора лучшего,
    /// в исходном написании слова.
    pub(crate) fn segment_word_all(&self, word: &str) -> Vec<Segmented> {
        self.legal_segmentations(word)
            .iter()
            .map(|solution| Segmented::from_segmentation(word, solution))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_infrastructure::infrastructure::make_segmenter;
    use crate::ModelOrder;
    use test_case::test_case;

    fn segmentation(morphemes: &[&str]) -> Segmentation {
        morphemes.iter().map(|m| Morpheme::from_str(m)).collect()
    }

    #[test]
    fn test_score_ordering() {
        let positive = Score { score: 1e-7, zero_penalty: 0 };
        let zero = Score { score: 0.0, zero_penalty: -1 };
        let worse_zero = Score { score: 0.0, zero_penalty: -3 };

        assert!(Score::FLOOR < worse_zero);
        assert!(worse_zero < zero);
        assert!(zero < positive);
        assert!(positive <= positive);
    }

    #[test]
    fn test_maximal_match_dominance() {
        let longer = segmentation(&["hund", "o", "j"]);
        let shorter = segmentation(&["hundo", "j"]);

        let best = maximal_match(vec![shorter.clone(), longer.clone(), shorter]);
        assert_eq!(best, longer);
    }

    #[test]
    fn test_maximal_match_tie_breaks_on_surfaces() {
        let left = segmentation(&["ab", "c"]);
        let right = segmentation(&["a", "bc"]);

        // При равной длине побеждает лексикографически большее разбиение.
        let best = maximal_match(vec![right, left.clone()]);
        assert_eq!(best, left);
    }

    #[test]
    fn test_maximal_match_empty() {
        assert_eq!(maximal_match(Vec::new()), Segmentation::default());
    }

    #[test_case("kato", "kat'o")]
    #[test_case("hundoj", "hund'o'j")]
    #[test_case("malsana", "mal'san'a")]
    #[test_case("la", "la")]
    #[test_case("ŝajnas", "ŝajn'as"; "hat letters survive the pipeline")]
    #[test_case("Kato", "Kat'o"; "case survives the pipeline")]
    #[test_case("kiu", "ki'u")]
    #[test_case("xyzzyq", ""; "no segmentation is an empty result")]
    fn test_segment_scenarios(word: &str, segmented: &str) {
        let segmenter = make_segmenter(ModelOrder::Bigram);
        assert_eq!(segmenter.segment(word).unwrap().to_string(), segmented);
    }

    #[test]
    /// Марковская модель отсекает слитный корень "hundo":
    /// обученная цепочка noun -> nounEnding -> midEnding побеждает.
    fn test_markov_disambiguation() {
        let segmenter = make_segmenter(ModelOrder::Bigram);

        let ranked = segmenter.segment_ranked("hundoj").unwrap();
        assert!(ranked.len() >= 2);
        assert_eq!(ranked[0].segmentation, segmentation(&["hund", "o", "j"]));
        assert!(ranked[0].score.score > 0.0);
        assert_eq!(
            ranked[0].tags,
            crate::tags![MarkovTag::Noun, MarkovTag::NounEnding, MarkovTag::MidEnding]
        );
        assert!(ranked.last().unwrap().score.score == 0.0);
    }

    #[test]
    fn test_ranked_is_sorted() {
        let segmenter = make_segmenter(ModelOrder::Bigram);

        let ranked = segmenter.segment_ranked("hundoj").unwrap();
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    /// Повторные вызовы дают один и тот же результат.
    fn test_selection_stability() {
        let segmenter = make_segmenter(ModelOrder::Trigram);

        for word in ["kato", "hundoj", "malsana", "kiu", "xyzzyq"] {
            let first = segmenter.segment(word).unwrap();
            let second = segmenter.segment(word).unwrap();
            assert_eq!(first.morphemes(), second.morphemes());
        }
    }

    #[test]
    fn test_max_match_mode() {
        let segmenter = make_segmenter(ModelOrder::Bigram);

        let segmented = segmenter.segment_max_match("hundoj");
        assert_eq!(segmented.to_string(), "hund'o'j");
    }

    #[test]
    fn test_all_mode() {
        let segmenter = make_segmenter(ModelOrder::Bigram);

        let all = segmenter.segmentations("hundoj");
        let strings: Vec<String> = all.iter().map(|s| s.to_string()).collect();
        assert_eq!(strings, ["hund'o'j", "hundo'j"]);
    }

    #[test]
    /// Без правил решений не меньше, чем с правилами.
    fn test_ignore_rules_pipeline() {
        let strict = make_segmenter(ModelOrder::Bigram);
        let lax = make_segmenter(ModelOrder::Bigram).ignore_rules();

        assert!(strict.segmentations("hundu").is_empty());
        assert_eq!(lax.segment("hundu").unwrap().to_string(), "hund'u");
    }
}
