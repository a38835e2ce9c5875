use allocative::Allocative;
use serde::{Deserialize, Serialize};

#[rustfmt::skip]
#[derive(Debug, derive_more::Display, Copy, Clone, Deserialize, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord, Allocative)]
/// Мелкозернистый тип морфемы: по одному на каждый пословный список,
/// плюс псевдо-теги начала и конца слова для марковской оценки.
pub enum MarkovTag {
    #[serde(rename = "adjEnding")]
    /// Окончание прилагательного
    AdjEnding,
    #[serde(rename = "adj")]
    /// Корень прилагательного
    Adj,
    #[serde(rename = "adjSuffix")]
    AdjSuffix,
    #[serde(rename = "advEnding")]
    /// Окончание наречия
    AdvEnding,
    #[serde(rename = "adverb")]
    /// Самостоятельное наречие
    Adverb,
    #[serde(rename = "adv")]
    /// Корень наречия
    Adv,
    #[serde(rename = "article")]
    /// Артикль, единственный в языке - "la"
    Article,
    #[serde(rename = "conjunction")]
    Conjunction,
    #[serde(rename = "expression")]
    Expression,
    #[serde(rename = "midEnding")]
    /// Серединное окончание: множественное число, аккузатив
    MidEnding,
    #[serde(rename = "nounEnding")]
    /// Окончание существительного
    NounEnding,
    #[serde(rename = "nounHumanPrefix")]
    NounHumanPrefix,
    #[serde(rename = "nounHuman")]
    /// Корень одушевленного существительного
    NounHuman,
    #[serde(rename = "nounHumanSuffix")]
    NounHumanSuffix,
    #[serde(rename = "nounPrefix")]
    NounPrefix,
    #[serde(rename = "noun")]
    /// Корень существительного
    Noun,
    #[serde(rename = "nounSuffix")]
    NounSuffix,
    #[serde(rename = "number")]
    /// Числительное
    Number,
    #[serde(rename = "numberSuffix")]
    NumberSuffix,
    #[serde(rename = "o")]
    /// Слова-частицы на -o
    O,
    #[serde(rename = "preposition")]
    /// Предлог
    Preposition,
    #[serde(rename = "prepPrefix")]
    PrepPrefix,
    #[serde(rename = "pronoun")]
    /// Местоимение
    Pronoun,
    #[serde(rename = "tablePronounEnding")]
    /// Окончание табличного слова или местоимения
    TablePronounEnding,
    #[serde(rename = "table")]
    /// Основа табличного слова (ki-, ti-, ...)
    Table,
    #[serde(rename = "tenseSuffix")]
    TenseSuffix,
    #[serde(rename = "verbEnding")]
    /// Окончание глагола
    VerbEnding,
    #[serde(rename = "verbPrefix")]
    VerbPrefix,
    #[serde(rename = "verb")]
    /// Корень глагола
    Verb,
    #[serde(rename = "verbSuffix")]
    VerbSuffix,

    #[serde(rename = "<BOW>")]
    /// Псевдо-тег начала слова, в списках морфем не встречается.
    Start,
    #[serde(rename = "<EOW>")]
    /// Псевдо-тег конца слова, в списках морфем не встречается.
    End,
}

impl MarkovTag {
    /// Все теги, за которыми закреплен пословный список.
    /// Порядок фиксирован и определяет порядок наполнения словаря.
    #[rustfmt::skip]
    pub const LISTED: [MarkovTag; 30] = [
        MarkovTag::AdjEnding, MarkovTag::Adj, MarkovTag::AdjSuffix,
        MarkovTag::AdvEnding, MarkovTag::Adverb, MarkovTag::Adv,
        MarkovTag::Article, MarkovTag::Conjunction, MarkovTag::Expression,
        MarkovTag::MidEnding, MarkovTag::NounEnding, MarkovTag::NounHumanPrefix,
        MarkovTag::NounHuman, MarkovTag::NounHumanSuffix, MarkovTag::NounPrefix,
        MarkovTag::Noun, MarkovTag::NounSuffix, MarkovTag::Number,
        MarkovTag::NumberSuffix, MarkovTag::O, MarkovTag::Preposition,
        MarkovTag::PrepPrefix, MarkovTag::Pronoun, MarkovTag::TablePronounEnding,
        MarkovTag::Table, MarkovTag::TenseSuffix, MarkovTag::VerbEnding,
        MarkovTag::VerbPrefix, MarkovTag::Verb, MarkovTag::VerbSuffix,
    ];

    /// Имя тега в корпусе и в базовом имени пословного списка (lowerCamel).
    /// Псевдо-теги хранятся под скобочными именами модели.
    pub fn corpus_name(self) -> &'static str {
        match self {
            MarkovTag::AdjEnding => "adjEnding",
            MarkovTag::Adj => "adj",
            MarkovTag::AdjSuffix => "adjSuffix",
            MarkovTag::AdvEnding => "advEnding",
            MarkovTag::Adverb => "adverb",
            MarkovTag::Adv => "adv",
            MarkovTag::Article => "article",
            MarkovTag::Conjunction => "conjunction",
            MarkovTag::Expression => "expression",
            MarkovTag::MidEnding => "midEnding",
            MarkovTag::NounEnding => "nounEnding",
            MarkovTag::NounHumanPrefix => "nounHumanPrefix",
            MarkovTag::NounHuman => "nounHuman",
            MarkovTag::NounHumanSuffix => "nounHumanSuffix",
            MarkovTag::NounPrefix => "nounPrefix",
            MarkovTag::Noun => "noun",
            MarkovTag::NounSuffix => "nounSuffix",
            MarkovTag::Number => "number",
            MarkovTag::NumberSuffix => "numberSuffix",
            MarkovTag::O => "o",
            MarkovTag::Preposition => "preposition",
            MarkovTag::PrepPrefix => "prepPrefix",
            MarkovTag::Pronoun => "pronoun",
            MarkovTag::TablePronounEnding => "tablePronounEnding",
            MarkovTag::Table => "table",
            MarkovTag::TenseSuffix => "tenseSuffix",
            MarkovTag::VerbEnding => "verbEnding",
            MarkovTag::VerbPrefix => "verbPrefix",
            MarkovTag::Verb => "verb",
            MarkovTag::VerbSuffix => "verbSuffix",
            MarkovTag::Start => "<BOW>",
            MarkovTag::End => "<EOW>",
        }
    }

    /// Обратное преобразование корпусного имени.
    pub fn from_corpus_name(name: &str) -> Option<Self> {
        let tag = match name {
            "adjEnding" => MarkovTag::AdjEnding,
            "adj" => MarkovTag::Adj,
            "adjSuffix" => MarkovTag::AdjSuffix,
            "advEnding" => MarkovTag::AdvEnding,
            "adverb" => MarkovTag::Adverb,
            "adv" => MarkovTag::Adv,
            "article" => MarkovTag::Article,
            "conjunction" => MarkovTag::Conjunction,
            "expression" => MarkovTag::Expression,
            "midEnding" => MarkovTag::MidEnding,
            "nounEnding" => MarkovTag::NounEnding,
            "nounHumanPrefix" => MarkovTag::NounHumanPrefix,
            "nounHuman" => MarkovTag::NounHuman,
            "nounHumanSuffix" => MarkovTag::NounHumanSuffix,
            "nounPrefix" => MarkovTag::NounPrefix,
            "noun" => MarkovTag::Noun,
            "nounSuffix" => MarkovTag::NounSuffix,
            "number" => MarkovTag::Number,
            "numberSuffix" => MarkovTag::NumberSuffix,
            "o" => MarkovTag::O,
            "preposition" => MarkovTag::Preposition,
            "prepPrefix" => MarkovTag::PrepPrefix,
            "pronoun" => MarkovTag::Pronoun,
            "tablePronounEnding" => MarkovTag::TablePronounEnding,
            "table" => MarkovTag::Table,
            "tenseSuffix" => MarkovTag::TenseSuffix,
            "verbEnding" => MarkovTag::VerbEnding,
            "verbPrefix" => MarkovTag::VerbPrefix,
            "verb" => MarkovTag::Verb,
            "verbSuffix" => MarkovTag::VerbSuffix,
            "<BOW>" => MarkovTag::Start,
            "<EOW>" => MarkovTag::End,
            _ => return None,
        };
        Some(tag)
    }

    /// Фиксированная проекция мелкозернистого тега в грубый класс правил.
    /// Псевдо-теги класса не имеют.
    pub fn rule_class(self) -> Option<RuleClass> {
        let class = match self {
            MarkovTag::AdjEnding
            | MarkovTag::AdvEnding
            | MarkovTag::NounEnding
            | MarkovTag::VerbEnding
            | MarkovTag::MidEnding
            | MarkovTag::O => RuleClass::WordEnd,
            MarkovTag::TablePronounEnding => RuleClass::TablePronounEnding,
            MarkovTag::Pronoun => RuleClass::Pronoun,
            MarkovTag::Article => RuleClass::Article,
            MarkovTag::Adj
            | MarkovTag::Adv
            | MarkovTag::NounHuman
            | MarkovTag::Noun
            | MarkovTag::Verb
            | MarkovTag::AdjSuffix
            | MarkovTag::NounHumanSuffix
            | MarkovTag::NounSuffix
            | MarkovTag::NumberSuffix
            | MarkovTag::TenseSuffix
            | MarkovTag::VerbSuffix
            | MarkovTag::NounHumanPrefix
            | MarkovTag::NounPrefix
            | MarkovTag::PrepPrefix
            | MarkovTag::VerbPrefix => RuleClass::Normal,
            MarkovTag::Adverb
            | MarkovTag::Conjunction
            | MarkovTag::Expression
            | MarkovTag::Number
            | MarkovTag::Preposition => RuleClass::Standalone,
            MarkovTag::Table => RuleClass::Table,
            MarkovTag::Start | MarkovTag::End => return None,
        };
        Some(class)
    }
}

#[rustfmt::skip]
#[derive(Debug, derive_more::Display, Copy, Clone, Deserialize, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord, Allocative)]
/// Грубый класс морфемы для правил совместимости первого прохода.
pub enum RuleClass {
    /// Самостоятельное слово
    Standalone,
    Pronoun,
    /// Корень/приставка/суффикс, не завершающие слово
    Normal,
    /// Грамматическое окончание
    WordEnd,
    Table,
    Article,
    TablePronounEnding,
}

impl RuleClass {
    /// Может ли морфема данного класса законно завершать слово.
    pub fn may_end_word(self) -> bool {
        !matches!(self, RuleClass::Normal)
    }

    /// Согласуется ли класс с классом предыдущей принятой морфемы.
    /// В начале слова предыдущего класса нет.
    pub fn agrees_with(self, prev: Option<RuleClass>) -> bool {
        match self {
            RuleClass::TablePronounEnding => {
                matches!(prev, Some(RuleClass::Table) | Some(RuleClass::Pronoun))
            }
            RuleClass::Article => prev.is_none(),
            _ => prev != Some(RuleClass::Article),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    /// У каждого спискового тега есть класс, имя существует и обратимо.
    fn test_listed_tags_round_trip() {
        for tag in MarkovTag::LISTED {
            assert!(tag.rule_class().is_some(), "{tag} lost its rule class");
            assert_eq!(MarkovTag::from_corpus_name(tag.corpus_name()), Some(tag));
        }
    }

    #[test]
    fn test_pseudo_tags() {
        assert_eq!(MarkovTag::Start.rule_class(), None);
        assert_eq!(MarkovTag::End.rule_class(), None);
        assert_eq!(MarkovTag::from_corpus_name("<BOW>"), Some(MarkovTag::Start));
        assert_eq!(MarkovTag::from_corpus_name("<EOW>"), Some(MarkovTag::End));
        assert_eq!(MarkovTag::from_corpus_name("bow"), None);
    }

    #[test_case(MarkovTag::NounEnding, RuleClass::WordEnd)]
    #[test_case(MarkovTag::O, RuleClass::WordEnd)]
    #[test_case(MarkovTag::TablePronounEnding, RuleClass::TablePronounEnding)]
    #[test_case(MarkovTag::Pronoun, RuleClass::Pronoun)]
    #[test_case(MarkovTag::Article, RuleClass::Article)]
    #[test_case(MarkovTag::VerbPrefix, RuleClass::Normal)]
    #[test_case(MarkovTag::TenseSuffix, RuleClass::Normal)]
    #[test_case(MarkovTag::Preposition, RuleClass::Standalone)]
    #[test_case(MarkovTag::Table, RuleClass::Table)]
    fn test_projection(tag: MarkovTag, class: RuleClass) {
        assert_eq!(tag.rule_class(), Some(class));
    }

    #[test]
    fn test_valid_endings() {
        assert!(!RuleClass::Normal.may_end_word());
        for class in [
            RuleClass::Standalone,
            RuleClass::Pronoun,
            RuleClass::WordEnd,
            RuleClass::Table,
            RuleClass::Article,
            RuleClass::TablePronounEnding,
        ] {
            assert!(class.may_end_word(), "{class} must be a valid ending");
        }
    }

    #[test_case(RuleClass::TablePronounEnding, Some(RuleClass::Table), true)]
    #[test_case(RuleClass::TablePronounEnding, Some(RuleClass::Pronoun), true)]
    #[test_case(RuleClass::TablePronounEnding, Some(RuleClass::Normal), false)]
    #[test_case(RuleClass::TablePronounEnding, None, false)]
    #[test_case(RuleClass::Article, None, true)]
    #[test_case(RuleClass::Article, Some(RuleClass::Normal), false)]
    #[test_case(RuleClass::Normal, Some(RuleClass::Article), false; "nothing follows the article")]
    #[test_case(RuleClass::Normal, Some(RuleClass::Normal), true)]
    #[test_case(RuleClass::WordEnd, None, true)]
    fn test_agreement(class: RuleClass, prev: Option<RuleClass>, agrees: bool) {
        assert_eq!(class.agrees_with(prev), agrees);
    }
}
