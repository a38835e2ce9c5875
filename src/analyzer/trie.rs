use crate::{
    analyzer::{Morpheme, Segmentation, TagSeq, SMALLRULE, SMALLTAG},
    errors::SegmentErr,
    lexicon::Lexicon,
    morph::tags::{MarkovTag, RuleClass},
};
use allocative::Allocative;
use itertools::Itertools;
use smallvec::SmallVec;
use std::collections::HashMap;

#[derive(Debug, Default, Allocative)]
/// Буквенное префиксное дерево морфем.
/// Строится один раз из лексикона и далее не меняется.
pub struct MorphemeTrie {
    root: TrieNode,
}

#[derive(Debug, Default, Allocative)]
/// Узел дерева. Набор марковских тегов непуст тогда и только тогда,
/// когда путь от корня до узла является известной морфемой;
/// набор классов правил - всегда его проекция.
pub struct TrieNode {
    #[allocative(skip)]
    children: HashMap<char, TrieNode>,
    #[allocative(skip)]
    markov_tags: SmallVec<[MarkovTag; SMALLTAG]>,
    #[allocative(skip)]
    rule_classes: SmallVec<[RuleClass; SMALLRULE]>,
}

impl TrieNode {
    /// Марковские теги, закрепленные за узлом.
    pub fn markov_tags(&self) -> &[MarkovTag] {
        &self.markov_tags
    }

    /// Классы правил, закрепленные за узлом.
    pub fn rule_classes(&self) -> &[RuleClass] {
        &self.rule_classes
    }

    /// Завершается ли в узле хотя бы одна морфема.
    pub fn is_terminal(&self) -> bool {
        !self.markov_tags.is_empty()
    }

    /// Исчерпывающий поиск в глубину: на каждой позиции либо продолжаем
    /// текущую морфему по дочернему узлу, либо принимаем ее и перезапускаемся
    /// с корня, пронося дальше выбранный класс правил.
    ///
    /// Ветвление по классам обязательно: одна поверхность может проецироваться
    /// в разные классы с разными ограничениями на продолжение.
    fn search(
        &self,
        root: &TrieNode,
        word: &[char],
        start: usize,
        next: usize,
        prev: Option<RuleClass>,
        ignore_rules: bool,
    ) -> Vec<Segmentation> {
        let mut solutions = Vec::new();

        let agreed: SmallVec<[RuleClass; SMALLRULE]> = self
            .rule_classes
            .iter()
            .copied()
            .filter(|class| ignore_rules || class.agrees_with(prev))
            .collect();

        if next == word.len() {
            // Конец слова: последняя морфема обязана допускать завершение.
            if agreed
                .iter()
                .any(|class| ignore_rules || class.may_end_word())
            {
                solutions.push(vec![collect_surface(&word[start..next])]);
            }
        } else {
            // Принимаем морфему и начинаем следующую с корня.
            for committed in agreed {
                for tail in root.search(root, word, next, next, Some(committed), ignore_rules) {
                    let mut segmentation = Segmentation::with_capacity(tail.len() + 1);
                    segmentation.push(collect_surface(&word[start..next]));
                    segmentation.extend(tail);
                    solutions.push(segmentation);
                }
            }

            // Продолжаем текущую морфему.
            if let Some(child) = self.children.get(&word[next]) {
                solutions.extend(child.search(root, word, start, next + 1, prev, ignore_rules));
            }
        }

        solutions
    }
}

fn collect_surface(letters: &[char]) -> Morpheme {
    let mut surface = Morpheme::new();
    for letter in letters {
        surface.push(*letter);
    }
    surface
}

impl MorphemeTrie {
    /// Наполнение дерева всеми морфемами лексикона.
    pub fn from_lexicon(lexicon: &Lexicon) -> Self {
        let mut trie = Self::default();
        for (tag, morpheme) in lexicon.iter() {
            trie.insert(tag, morpheme);
        }
        trie
    }

    /// Прокладка пути поверхности и закрепление тега с его проекцией
    /// за конечным узлом.
    pub fn insert(&mut self, tag: MarkovTag, surface: &str) {
        if surface.is_empty() {
            return;
        }

        let mut node = &mut self.root;
        for letter in surface.chars() {
            node = node.children.entry(letter).or_default();
        }

        if !node.markov_tags.contains(&tag) {
            node.markov_tags.push(tag);
        }
        if let Some(class) = tag.rule_class() {
            if !node.rule_classes.contains(&class) {
                node.rule_classes.push(class);
            }
        }
    }

    /// Узел, путь до которого совпадает с поверхностью.
    pub fn lookup(&self, surface: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for letter in surface.chars() {
            node = node.children.get(&letter)?;
        }
        Some(node)
    }

    /// Все допустимые правилами разбиения слова на морфемы.
    /// Порядок детерминирован, дубликаты отброшены.
    pub fn find_morphemes(&self, word: &str, ignore_rules: bool) -> Vec<Segmentation> {
        let letters: Vec<char> = word.chars().collect();
        let mut solutions = self
            .root
            .search(&self.root, &letters, 0, 0, None, ignore_rules);
        solutions.sort();
        solutions.dedup();
        solutions
    }

    /// Все последовательности тегов разбиения: независимый выбор одного
    /// марковского тега на каждую морфему.
    ///
    /// Каждая поверхность обязана быть получена из `find_morphemes`
    /// этого же дерева, иначе это потеря инварианта.
    pub fn all_taggings(&self, segmentation: &[Morpheme]) -> Result<Vec<TagSeq>, SegmentErr> {
        if segmentation.is_empty() {
            return Ok(vec![TagSeq::new()]);
        }

        let tag_sets = segmentation
            .iter()
            .map(|surface| {
                self.lookup(surface)
                    .filter(|node| node.is_terminal())
                    .map(|node| node.markov_tags())
                    .ok_or_else(|| SegmentErr::LostMorpheme(surface.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(tag_sets
            .into_iter()
            .map(|tags| tags.iter().copied())
            .multi_cartesian_product()
            .map(TagSeq::from_vec)
            .collect())
    }
}
