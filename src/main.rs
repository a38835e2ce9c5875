use clap::{Parser, Subcommand};
use espo_rs::{
    errors::{EspoErr, EspoResult},
    EsperantoSegmenter, ModelOrder,
};
use itertools::Itertools;
use mimalloc::MiMalloc;
use std::{io::Write, path::PathBuf};
use tracing::{debug, info};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Debug, Subcommand)]
enum Commands {
    /// Сегментация одного слова.
    Segment {
        word: String,

        #[clap(short, long, default_value_t = false)]
        /// Печатать все оцененные кандидаты, а не только лучший.
        ranked: bool,
    },
    /// Сегментация файла: берется первая табличная колонка каждой строки.
    SegmentText {
        input_file: PathBuf,

        #[clap(short, long, default_value = "output.txt")]
        output_file: PathBuf,

        #[clap(short, long, default_value_t = false)]
        /// Максимальное совпадение вместо марковской модели.
        max_match: bool,

        #[clap(short, long, default_value_t = false)]
        /// Пропустить выбор лучшего: печатать все легальные разбиения.
        random: bool,
    },
    /// Обучение модели на корпусе и сохранение в каталог модели.
    Train,
    /// Оценка точности по размеченному файлу с выгрузкой CSV-отчета.
    Evaluate {
        #[clap(short, long, default_value = "test.txt")]
        text_file: PathBuf,

        #[clap(short = 'p', long, default_value = "output.csv")]
        output_path: PathBuf,
    },
}

#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Каталог пословных списков морфем.
    #[clap(short, long = "sets", default_value = "data/sets/")]
    sets_dir: PathBuf,

    /// Куда идет обученная модель.
    #[clap(short, long = "model", default_value = "data/model/")]
    model_dir: PathBuf,

    /// Размеченный обучающий корпус.
    #[clap(short, long = "train", default_value = "data/train.txt")]
    train_file: PathBuf,

    #[clap(short, long, default_value = "bigram")]
    order: ModelOrder,

    #[clap(short, long, default_value_t = false)]
    /// Требуется ли обучение модели или только открыть ее.
    init: bool,

    #[clap(short = 'n', long, default_value_t = false)]
    /// Не применять правила совместимости на первом проходе.
    no_rules: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let Args {
        sets_dir,
        model_dir,
        train_file,
        order,
        init,
        no_rules,
        command,
    } = Args::parse();

    let start = std::time::Instant::now();

    let segmenter = match init || matches!(command, Commands::Train) {
        true => EsperantoSegmenter::create(&sets_dir, &train_file, &model_dir, order)?,
        false => EsperantoSegmenter::open(&sets_dir, &model_dir, order)?,
    };
    let segmenter = match no_rules {
        true => segmenter.ignore_rules(),
        false => segmenter,
    };

    debug!("Инициализация сегментатора: {:?}", start.elapsed());
    debug!(
        "Весит: {}",
        allocative::size_of_unique_allocated_data(&segmenter)
    );

    match command {
        Commands::Train => {}
        Commands::Segment { word, ranked } => {
            if ranked {
                for candidate in segmenter.segment_ranked(&word)? {
                    println!("{candidate}");
                }
            } else {
                println!("{}", segmenter.segment(&word)?);
            }
        }
        Commands::SegmentText {
            input_file,
            output_file,
            max_match,
            random,
        } => segment_text(&segmenter, &input_file, &output_file, max_match, random)?,
        Commands::Evaluate {
            text_file,
            output_path,
        } => evaluate(&segmenter, &text_file, &output_path)?,
    };

    Ok(())
}

/// Прогон файла слов: на каждую строку пишется `слово \t разбиение`.
fn segment_text(
    segmenter: &EsperantoSegmenter,
    input_file: &PathBuf,
    output_file: &PathBuf,
    max_match: bool,
    random: bool,
) -> EspoResult<()> {
    let buf = std::fs::read_to_string(input_file).map_err(|error| EspoErr::File {
        file: input_file.to_path_buf(),
        error,
    })?;
    let writer = std::fs::File::create(output_file).map_err(|error| EspoErr::File {
        file: output_file.to_path_buf(),
        error,
    })?;
    let mut writer = std::io::BufWriter::new(writer);

    for line in buf.lines() {
        let word = line.split('\t').next().unwrap_or_default().to_lowercase();
        if word.is_empty() {
            continue;
        }

        if random {
            let solutions = segmenter
                .segmentations(&word)
                .iter()
                .map(ToString::to_string)
                .join("\t");
            writeln!(writer, "{solutions}")?;
        } else if max_match {
            writeln!(writer, "{}\t{}", word, segmenter.segment_max_match(&word))?;
        } else {
            writeln!(writer, "{}\t{}", word, segmenter.segment(&word)?)?;
        }
    }

    Ok(())
}

/// Оценка по размеченному файлу `слово \t эталонное разбиение`.
///
/// Подряд идущие повторы слова пропускаются: в корпусах обучающая
/// и тестовая выборки содержат одинаковые соседние строки.
fn evaluate(
    segmenter: &EsperantoSegmenter,
    text_file: &PathBuf,
    output_path: &PathBuf,
) -> EspoResult<()> {
    let buf = std::fs::read_to_string(text_file).map_err(|error| EspoErr::File {
        file: text_file.to_path_buf(),
        error,
    })?;

    let mut num_correct = 0u32;
    let mut num_incorrect = 0u32;
    let mut incorrect: Vec<(String, String, String)> = Vec::new();
    let mut no_segmentation: Vec<String> = Vec::new();

    let mut prev_word = "";
    for line in buf.lines() {
        let mut fields = line.split('\t');
        let (Some(word), Some(answer)) = (fields.next(), fields.next()) else {
            continue;
        };
        if word == prev_word {
            continue;
        }
        prev_word = word;

        let segmented = segmenter.segment(word)?;
        if !segmented.is_segmented() {
            no_segmentation.push(word.to_string());
        } else if segmented.to_string() == answer {
            num_correct += 1;
        } else {
            num_incorrect += 1;
            incorrect.push((word.to_string(), answer.to_string(), segmented.to_string()));
        }
    }

    let num_total = num_correct + num_incorrect;
    let accuracy = match num_total {
        0 => 0.0,
        _ => f64::from(num_correct) / f64::from(num_total),
    };

    info!("accuracy        : {:.2} %", accuracy * 100.0);
    info!("num of correct  : {num_correct} pcs");
    info!("num of incorrect: {num_incorrect} pcs");
    info!("no segmentation : {} pcs", no_segmentation.len());

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(output_path)
        .map_err(EspoErr::Csv)?;

    writer.write_record(["--- summary ---"])?;
    writer.write_record(["n_total", "n_correct", "n_incorrect", "accuracy"])?;
    writer.write_record([
        num_total.to_string(),
        num_correct.to_string(),
        num_incorrect.to_string(),
        accuracy.to_string(),
    ])?;
    writer.write_record([""])?;
    writer.write_record(["--- incorrect results ---"])?;
    writer.write_record(["word", "answer", "result"])?;
    for (word, answer, result) in incorrect {
        writer.write_record([word, answer, result])?;
    }
    writer.write_record([""])?;
    writer.write_record(["--- no segmentation results ---"])?;
    for word in no_segmentation {
        writer.write_record([word])?;
    }
    writer.flush().map_err(EspoErr::IO)?;

    Ok(())
}
