//! Чтение пословных списков морфем: по одному UTF-8 файлу на тип,
//! по одной морфеме в строке, в нижнем регистре и в x-нотации.

use crate::{errors::LexiconErr, morph::tags::MarkovTag};
use allocative::Allocative;
use std::{collections::HashMap, path::Path};
use tracing::{debug, info};

#[derive(Debug, Default)]
/// Полный набор морфем, прочитанный из каталога списков.
/// Порядок типов и морфем фиксирован порядком файлов и строк.
pub struct Lexicon {
    entries: Vec<(MarkovTag, Vec<String>)>,
}

impl Lexicon {
    /// Чтение каталога со списками. Каждому списковому тегу обязан
    /// соответствовать файл `<имя типа>.txt`; его отсутствие фатально.
    pub fn load<P: AsRef<Path>>(sets_dir: P) -> Result<Self, LexiconErr> {
        let mut entries = Vec::with_capacity(MarkovTag::LISTED.len());

        for tag in MarkovTag::LISTED {
            let file = sets_dir.as_ref().join(format!("{}.txt", tag.corpus_name()));
            let buf = std::fs::read_to_string(&file)
                .map_err(|error| LexiconErr::List { file, error })?;

            let morphemes: Vec<String> = buf
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect();

            debug!("{}: {} морфем", tag.corpus_name(), morphemes.len());
            entries.push((tag, morphemes));
        }

        info!("Lexicon was loaded");
        Ok(Self { entries })
    }

    /// Проход по парам (тег, морфема) в порядке чтения.
    pub fn iter(&self) -> impl Iterator<Item = (MarkovTag, &str)> {
        self.entries
            .iter()
            .flat_map(|(tag, morphemes)| morphemes.iter().map(|m| (*tag, m.as_str())))
    }

    /// Численность каждого типа, нужна марковскому обучению
    /// для штрафования частых категорий.
    pub fn populations(&self) -> TagPopulations {
        let counts: HashMap<MarkovTag, usize> = self
            .entries
            .iter()
            .map(|(tag, morphemes)| (*tag, morphemes.len()))
            .collect();
        let total = counts.values().sum();

        TagPopulations { counts, total }
    }
}

#[derive(Debug, Default, Clone, Allocative)]
/// Численность морфем по типам и общая сумма.
pub struct TagPopulations {
    #[allocative(skip)]
    counts: HashMap<MarkovTag, usize>,
    total: usize,
}

impl TagPopulations {
    /// Численность типа. Для состояний без морфем (псевдо-тег конца слова,
    /// пустой список) возвращается общая численность,
    /// чтобы нормализация переходов не делила на ноль.
    pub fn count(&self, tag: MarkovTag) -> usize {
        match self.counts.get(&tag) {
            Some(&count) if count > 0 => count,
            _ => self.total,
        }
    }

    /// Общее число морфем по всем типам.
    pub fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_infrastructure::infrastructure::make_sets_dir;

    #[test]
    fn test_load_counts() {
        let dir = make_sets_dir();
        let lexicon = Lexicon::load(dir.path()).unwrap();

        let populations = lexicon.populations();
        assert_eq!(populations.count(MarkovTag::Article), 1);
        assert_eq!(populations.count(MarkovTag::Noun), 4);
        assert_eq!(
            populations.total(),
            lexicon.iter().count(),
            "total must match the inserted morphemes"
        );
        // Тип без списка отдает общую численность.
        assert_eq!(populations.count(MarkovTag::End), populations.total());
        // Пустой список ведет себя так же.
        assert_eq!(
            populations.count(MarkovTag::AdjSuffix),
            populations.total()
        );
    }

    #[test]
    fn test_missing_list_is_fatal() {
        let dir = make_sets_dir();
        std::fs::remove_file(dir.path().join("noun.txt")).unwrap();

        let err = Lexicon::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("noun.txt"));
    }
}
