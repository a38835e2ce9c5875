#[cfg(test)]
pub(crate) mod infrastructure {
    use crate::{
        analyzer::{MarkovModel, MorphemeTrie},
        lexicon::Lexicon,
        morph::tags::MarkovTag,
        EsperantoSegmenter, ModelOrder,
    };
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Непустые пословные списки тестового словаря.
    /// Остальные типы получают пустые файлы: каталог обязан быть полным.
    const SETS: [(&str, &str); 19] = [
        ("adj", "san\nbel\ngrand"),
        ("adjEnding", "a"),
        ("advEnding", "e"),
        ("adverb", "nun\ntre"),
        ("article", "la"),
        ("conjunction", "kaj"),
        ("midEnding", "j\nn"),
        ("nounEnding", "o"),
        ("nounHuman", "amik"),
        ("nounPrefix", "mal"),
        ("noun", "kat\nhund\nhundo\ndom"),
        ("nounSuffix", "ej"),
        ("number", "unu\ndu"),
        ("preposition", "en\nal"),
        ("pronoun", "mi\nvi\nli"),
        ("tablePronounEnding", "u\nes\ne"),
        ("table", "ki\nti"),
        ("verbEnding", "as\nis\nos\ni"),
        ("verb", "sxajn\nvid"),
    ];

    /// Обучающий корпус, согласованный со списками выше.
    const TRAIN: &str = "\
kato\tKNOWN\tnoun'nounEnding\t10
katoj\tKNOWN\tnoun'nounEnding'midEnding\t6
hundoj\tKNOWN\tnoun'nounEnding'midEnding\t5
domo\tKNOWN\tnoun'nounEnding\t3
malsana\tKNOWN\tnounPrefix'adj'adjEnding\t3
bela\tKNOWN\tadj'adjEnding\t5
sane\tKNOWN\tadj'advEnding\t2
sxajnas\tKNOWN\tverb'verbEnding\t7
vidis\tKNOWN\tverb'verbEnding\t4
la\tKNOWN\tarticle\t20
kiu\tKNOWN\ttable'tablePronounEnding\t4
mi\tKNOWN\tpronoun\t8
nun\tKNOWN\tadverb\t2.5
";

    /// Сборка каталога пословных списков во временной директории.
    pub(crate) fn make_sets_dir() -> TempDir {
        let dir = tempfile::tempdir().expect("Sets tempdir");

        for tag in MarkovTag::LISTED {
            let stem = tag.corpus_name();
            let body = SETS
                .iter()
                .find(|(name, _)| *name == stem)
                .map(|(_, body)| *body)
                .unwrap_or_default();
            std::fs::write(dir.path().join(format!("{stem}.txt")), body)
                .unwrap_or_else(|_| panic!("List file: {stem}"));
        }

        dir
    }

    /// Запись обучающего корпуса рядом с тестом.
    pub(crate) fn make_train_file(dir: &Path) -> PathBuf {
        let path = dir.join("train.txt");
        std::fs::write(&path, TRAIN).expect("Train file");
        path
    }

    /// Дерево морфем из тестового словаря.
    pub(crate) fn make_trie() -> MorphemeTrie {
        let sets = make_sets_dir();
        let lexicon = Lexicon::load(sets.path()).expect("Lexicon");
        MorphemeTrie::from_lexicon(&lexicon)
    }

    /// Марковская модель, обученная на тестовом корпусе.
    pub(crate) fn make_model(order: ModelOrder) -> MarkovModel {
        let sets = make_sets_dir();
        let lexicon = Lexicon::load(sets.path()).expect("Lexicon");

        let dir = tempfile::tempdir().expect("Corpus tempdir");
        let corpus = make_train_file(dir.path());

        MarkovModel::train(&corpus, order, &lexicon.populations()).expect("Markov model")
    }

    /// Полный сегментатор над тестовым словарем и корпусом.
    pub(crate) fn make_segmenter(order: ModelOrder) -> EsperantoSegmenter {
        let sets = make_sets_dir();
        let dir = tempfile::tempdir().expect("Corpus tempdir");
        let corpus = make_train_file(dir.path());

        EsperantoSegmenter::init(sets.path(), corpus.as_path(), order).expect("Segmenter")
    }
}

#[cfg(test)]
mod experiments {
    use crate::{EsperantoSegmenter, ModelOrder};

    #[ignore = "Requires the EsperantoWordSegmenter datasets in data/"]
    #[test]
    /// Ручной прогон по настоящим спискам и корпусу EsperantoWordSegmenter.
    /// Запускается при обновлении словарей, чтобы глазами посмотреть выдачу.
    fn test_real_datasets() {
        let segmenter =
            EsperantoSegmenter::init("data/sets/", "data/train.txt", ModelOrder::Bigram).unwrap();

        for word in ["esperanto", "malsanulejo", "hundidoj", "ĉirkaŭiris"] {
            eprintln!("{}", segmenter.segment(word).unwrap());
        }
    }
}
