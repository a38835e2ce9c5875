//! Морфологическая сегментация слов эсперанто: исчерпывающий поиск
//! разбиений по дереву морфем с правилами совместимости и выбор
//! лучшего разбиения n-граммной марковской моделью.

/// Разбиение слова, перебор тегов и выбор лучшего кандидата.
pub(crate) mod analyzer;
pub mod errors;
/// Пословные списки морфем и численности типов.
pub(crate) mod lexicon;
/// Грамматические структуры эсперанто, используемые сегментатором.
#[macro_use]
pub mod morph;
/// Инфраструктура для юнит-тестов.
pub(crate) mod test_infrastructure;

use allocative::Allocative;
use errors::{EspoErr, EspoResult};
use itertools::Itertools;
use morph::orthography;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

pub use analyzer::{
    maximal_match, Context, MarkovModel, Morpheme, MorphemeTrie, Score, ScoredSegmentation,
    Segmentation, TagSeq, TrieNode, SMALLGRAM, SMALLMORF, SMALLRULE, SMALLSEQ, SMALLTAG,
};
pub use lexicon::{Lexicon, TagPopulations};
pub use morph::tags::{MarkovTag, RuleClass};

#[rustfmt::skip]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize, Allocative)]
/// Поддерживаемые порядки марковской модели.
pub enum ModelOrder {
    Unigram,
    #[default]
    Bigram,
    Trigram,
}

impl ModelOrder {
    /// Длина контекста таблицы переходов.
    pub fn n(self) -> usize {
        match self {
            ModelOrder::Unigram => 1,
            ModelOrder::Bigram => 2,
            ModelOrder::Trigram => 3,
        }
    }
}

#[derive(Debug, Allocative)]
/// Морфологический сегментатор, образованный из словаря морфем
/// и обученной марковской модели.
///
/// После создания неизменяем: дерево и таблица переходов только читаются,
/// флаг `ignore_rules` фиксируется при создании.
pub struct EsperantoSegmenter {
    pub(crate) trie: MorphemeTrie,
    pub(crate) markov: MarkovModel,
    pub(crate) ignore_rules: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Результат сегментации: исходное слово и морфемы в его исходном
/// написании. Пустой список морфем - легального разбиения нет.
pub struct Segmented {
    word: String,
    morphemes: Vec<String>,
}

impl Segmented {
    /// Слово без легального разбиения.
    pub(crate) fn empty(word: &str) -> Self {
        Self {
            word: word.to_string(),
            morphemes: Vec::new(),
        }
    }

    /// Сборка из разбиения в x-нотации: морфемы соединяются апострофами,
    /// затем поверх восстанавливается исходное написание слова.
    pub(crate) fn from_segmentation(word: &str, segmentation: &[Morpheme]) -> Self {
        if segmentation.is_empty() {
            return Self::empty(word);
        }

        let joined = segmentation.iter().join("'");
        let restored = orthography::restore(&joined, word);

        Self {
            word: word.to_string(),
            morphemes: restored.split('\'').map(str::to_string).collect(),
        }
    }

    /// Получение исходного слова.
    pub fn word(&self) -> String {
        self.word.to_owned()
    }

    /// Получение морфем в исходном написании.
    pub fn morphemes(&self) -> Vec<String> {
        self.morphemes.to_owned()
    }

    /// Нашлось ли хоть одно легальное разбиение.
    pub fn is_segmented(&self) -> bool {
        !self.morphemes.is_empty()
    }
}

/// Создание и открытие сегментатора, публичные операции над словами.
impl EsperantoSegmenter {
    /// Первичное создание сегментатора.
    ///
    /// `sets_dir` - каталог пословных списков морфем \
    /// `corpus` - размеченный обучающий корпус \
    /// `out_dir` - место, где будет храниться обученная модель \
    /// `order` - порядок марковской модели, по дефолту биграммы.
    pub fn create<P: AsRef<Path>>(
        sets_dir: P,
        corpus: P,
        out_dir: P,
        order: ModelOrder,
    ) -> EspoResult<Self> {
        let segmenter = Self::init(sets_dir, corpus, order)?;
        segmenter.markov.save(out_dir).map_err(EspoErr::Model)?;

        info!("Segmenter was created");
        Ok(segmenter)
    }

    /// Создание сегментатора без сохранения модели на диск.
    pub fn init<P: AsRef<Path>>(sets_dir: P, corpus: P, order: ModelOrder) -> EspoResult<Self> {
        let lexicon = Lexicon::load(sets_dir).map_err(EspoErr::Lexicon)?;
        let trie = MorphemeTrie::from_lexicon(&lexicon);
        let markov =
            MarkovModel::train(corpus, order, &lexicon.populations()).map_err(EspoErr::Model)?;

        Ok(Self {
            trie,
            markov,
            ignore_rules: false,
        })
    }

    /// Открытие сегментатора с ранее обученной моделью нужного порядка.
    pub fn open<P: AsRef<Path>>(sets_dir: P, model_dir: P, order: ModelOrder) -> EspoResult<Self> {
        let lexicon = Lexicon::load(sets_dir).map_err(EspoErr::Lexicon)?;
        let trie = MorphemeTrie::from_lexicon(&lexicon);
        let markov = MarkovModel::load(model_dir, order).map_err(EspoErr::Model)?;

        Ok(Self {
            trie,
            markov,
            ignore_rules: false,
        })
    }

    /// Отключение правил совместимости первого прохода.
    pub fn ignore_rules(mut self) -> Self {
        self.ignore_rules = true;
        self
    }

    /// Сегментация слова: лучший кандидат в исходном написании.
    ///
    /// Слово без легального разбиения дает пустой результат, это не ошибка.
    pub fn segment(&self, word: &str) -> EspoResult<Segmented> {
        self.segment_word(word).map_err(EspoErr::Segment)
    }

    /// Сегментация слова со всеми оцененными кандидатами, лучшие впереди.
    pub fn segment_ranked(&self, word: &str) -> EspoResult<Vec<ScoredSegmentation>> {
        self.segment_word_ranked(word).map_err(EspoErr::Segment)
    }

    /// Сегментация максимальным совпадением, без марковской модели.
    pub fn segment_max_match(&self, word: &str) -> Segmented {
        self.segment_word_max_match(word)
    }

    /// Все легальные разбиения слова без выбора лучшего.
    pub fn segmentations(&self, word: &str) -> Vec<Segmented> {
        self.segment_word_all(word)
    }

    /// Проверка поверхности на наличие в словаре морфем.
    pub fn is_morpheme(&self, surface: &str) -> bool {
        let notated = orthography::x_notation(&surface.to_lowercase());
        self.trie
            .lookup(&notated)
            .is_some_and(|node| node.is_terminal())
    }

    /// Порядок марковской модели сегментатора.
    pub fn order(&self) -> ModelOrder {
        self.markov.order()
    }
}
