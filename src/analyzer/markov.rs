use crate::{
    analyzer::{Context, Score},
    errors::ModelErr,
    lexicon::TagPopulations,
    morph::tags::MarkovTag,
    ModelOrder,
};
use allocative::Allocative;
use itertools::Itertools;
use regex::Regex;
use std::{
    collections::{BTreeMap, HashMap},
    fs::File,
    io::Write,
    iter,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Таблица переходов: контекст из n состояний -> следующее состояние -> вероятность.
/// В памяти контекст хранится массивом тегов и превращается в строку
/// только на границе сериализации.
pub type TransitionTable = HashMap<Context, HashMap<MarkovTag, f64>>;

/// Фиксированный понижающий множитель нормализации вероятностей.
const ALPHA: f64 = 0.00001;

#[derive(Debug, Allocative)]
/// n-граммная марковская модель переходов между типами морфем.
/// Обучается на размеченном корпусе, после обучения неизменяема.
pub struct MarkovModel {
    order: ModelOrder,
    #[allocative(skip)]
    transitions: TransitionTable,
}

impl MarkovModel {
    /// Обучение по корпусу: строки `слово \t аннотация \t тег'тег'... \t частота`,
    /// лишние поля игнорируются.
    ///
    /// Взвешенные частотой счетчики переходов нормализуются построчно,
    /// а затем перевзвешиваются численностью типа следующего состояния:
    /// `P(k | c) = x / T_c * M / N_k * ALPHA`. Так частые категории
    /// не заглушают переходы в редкие.
    pub fn train<P: AsRef<Path>>(
        corpus: P,
        order: ModelOrder,
        populations: &TagPopulations,
    ) -> Result<Self, ModelErr> {
        let n = order.n();
        let buf = std::fs::read_to_string(&corpus).map_err(|error| ModelErr::Corpus {
            file: corpus.as_ref().into(),
            error,
        })?;

        let mut transitions: TransitionTable = HashMap::new();

        for (index, row) in buf.lines().enumerate() {
            let line = index + 1;
            if row.trim().is_empty() {
                continue;
            }

            let mut fields = row.split('\t');
            let segment = fields
                .nth(2)
                .ok_or(ModelErr::LostField { line, field: "segmentation" })?;
            let freq = fields
                .next()
                .ok_or(ModelErr::LostField { line, field: "frequency" })?;
            let freq: f64 = freq.parse().map_err(|source| ModelErr::Frequency {
                line,
                value: freq.to_string(),
                source,
            })?;

            let segmentation = segment
                .split('\'')
                .map(|name| {
                    MarkovTag::from_corpus_name(name).ok_or_else(|| ModelErr::UnknownTag {
                        line,
                        name: name.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            // Слово обрамляется n псевдо-тегами начала и одним тегом конца.
            let mut states = Vec::with_capacity(n + segmentation.len() + 1);
            states.extend(iter::repeat(MarkovTag::Start).take(n));
            states.extend(segmentation.iter().copied());
            states.push(MarkovTag::End);

            for i in 0..=segmentation.len() {
                let context = Context::from_slice(&states[i..i + n]);
                *transitions
                    .entry(context)
                    .or_default()
                    .entry(states[i + n])
                    .or_insert(0.0) += freq;
            }
        }

        let total_morphemes = populations.total() as f64;
        for nexts in transitions.values_mut() {
            let row_total: f64 = nexts.values().sum();
            for (next, count) in nexts.iter_mut() {
                *count = *count / row_total / populations.count(*next) as f64
                    * total_morphemes
                    * ALPHA;
            }
        }

        debug!("Контекстов в модели: {}", transitions.len());
        info!("Markov model was trained");

        Ok(Self { order, transitions })
    }

    /// Порядок модели.
    pub fn order(&self) -> ModelOrder {
        self.order
    }

    /// Оценка последовательности тегов.
    ///
    /// Каждый найденный переход домножает score, каждый отсутствующий
    /// обнуляет его и уменьшает штраф; проход не прерывается, поэтому
    /// штраф считает все пропуски до конца слова.
    pub fn score(&self, segmentation: &[MarkovTag]) -> Score {
        let n = self.order.n();
        let mut prev_states: Context = iter::repeat(MarkovTag::Start).take(n).collect();

        let mut score = 1.0;
        let mut zero_penalty = 0;
        for state in segmentation.iter().chain(iter::once(&MarkovTag::End)) {
            match self
                .transitions
                .get(&prev_states)
                .and_then(|nexts| nexts.get(state))
            {
                Some(probability) => score *= probability,
                None => {
                    score = 0.0;
                    zero_penalty -= 1;
                }
            }

            prev_states.remove(0);
            prev_states.push(*state);
        }

        Score { score, zero_penalty }
    }

    /// Имя файла модели данного порядка.
    fn file_name(order: ModelOrder) -> String {
        format!("{}_gram_markov_model.json", order.n())
    }

    /// Сохранение таблицы переходов в JSON: контекст длины 1 - голое имя
    /// состояния, длиннее - кортеж имен в одинарных кавычках.
    pub fn save<P: AsRef<Path>>(&self, out_dir: P) -> Result<PathBuf, ModelErr> {
        let out_dir = out_dir.as_ref();
        std::fs::create_dir_all(out_dir).map_err(|error| ModelErr::Outdir {
            outdir: out_dir.into(),
            error,
        })?;
        let path = out_dir.join(Self::file_name(self.order));

        let mut table: BTreeMap<String, BTreeMap<&'static str, f64>> = BTreeMap::new();
        for (context, nexts) in &self.transitions {
            let row = table.entry(context_key(context)).or_default();
            for (next, probability) in nexts {
                row.insert(next.corpus_name(), *probability);
            }
        }

        let bytes = serde_json::to_vec(&table).map_err(ModelErr::Serde)?;
        let mut writer = File::create(&path).map_err(|error| ModelErr::ModelFile {
            file: path.clone(),
            error,
        })?;
        writer.write_all(&bytes).map_err(|error| ModelErr::ModelFile {
            file: path.clone(),
            error,
        })?;

        info!("Markov model was saved");
        Ok(path)
    }

    /// Открытие сохраненной модели нужного порядка.
    pub fn load<P: AsRef<Path>>(model_dir: P, order: ModelOrder) -> Result<Self, ModelErr> {
        let path = model_dir.as_ref().join(Self::file_name(order));
        let buf = std::fs::read_to_string(&path).map_err(|error| ModelErr::ModelFile {
            file: path,
            error,
        })?;
        let table: HashMap<String, HashMap<String, f64>> =
            serde_json::from_str(&buf).map_err(ModelErr::Serde)?;

        let state_regex = Regex::new(r"'([^']+)'").expect("state regex");

        let mut transitions = TransitionTable::with_capacity(table.len());
        for (key, row) in table {
            let states: Vec<&str> = if key.starts_with('(') {
                state_regex
                    .captures_iter(&key)
                    .map(|capture| capture.get(1).map_or("", |m| m.as_str()))
                    .collect()
            } else {
                vec![key.as_str()]
            };

            if states.is_empty() {
                return Err(ModelErr::EmptyContext(key.clone()));
            }
            if states.len() != order.n() {
                return Err(ModelErr::OrderMismatch {
                    key: key.clone(),
                    found: states.len(),
                    expected: order.n(),
                });
            }

            let context = states
                .iter()
                .map(|name| {
                    MarkovTag::from_corpus_name(name)
                        .ok_or_else(|| ModelErr::UnknownState(name.to_string()))
                })
                .collect::<Result<Context, _>>()?;

            let nexts = row
                .into_iter()
                .map(|(name, probability)| {
                    MarkovTag::from_corpus_name(&name)
                        .map(|tag| (tag, probability))
                        .ok_or(ModelErr::UnknownState(name))
                })
                .collect::<Result<HashMap<_, _>, _>>()?;

            transitions.insert(context, nexts);
        }

        Ok(Self { order, transitions })
    }
}

/// Строковый ключ контекста для сериализации.
fn context_key(context: &[MarkovTag]) -> String {
    if context.len() == 1 {
        context[0].corpus_name().to_string()
    } else {
        format!(
            "({})",
            context
                .iter()
                .map(|state| format!("'{}'", state.corpus_name()))
                .join(", ")
        )
    }
}
