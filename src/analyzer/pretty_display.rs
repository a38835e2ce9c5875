use super::{Score, ScoredSegmentation};
use crate::Segmented;

impl std::fmt::Display for Segmented {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let iter = self.morphemes.iter();
        let len = iter.clone().count();
        let last = iter.clone().last();
        if len > 1 {
            for morpheme in iter.take(len - 1) {
                write!(f, "{}'", morpheme)?;
            }
        }
        match last {
            Some(last) => write!(f, "{}", last),
            None => write!(f, ""),
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:e}, {})", self.score, self.zero_penalty)
    }
}

impl std::fmt::Display for ScoredSegmentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "score: {}, segm: ", self.score)?;
        let iter = self.segmentation.iter();
        let len = iter.clone().count();
        let last = iter.clone().last();
        if len > 1 {
            for morpheme in iter.take(len - 1) {
                write!(f, "{}'", morpheme)?;
            }
        }
        if let Some(last) = last {
            write!(f, "{}", last)?;
        }
        write!(f, ", tags: [")?;
        let iter = self.tags.iter();
        let len = iter.clone().count();
        let last = iter.clone().last();
        if len > 1 {
            for tag in iter.take(len - 1) {
                write!(f, "{}, ", tag)?;
            }
        }
        match last {
            Some(last) => write!(f, "{}", last)?,
            None => write!(f, "")?,
        };
        write!(f, "]")
    }
}

#[cfg(test)]
mod test {
    use crate::{
        analyzer::{Morpheme, Score, ScoredSegmentation},
        tags, MarkovTag, Segmented,
    };

    #[test]
    fn test_display_segmented() {
        let segmented = Segmented::from_segmentation(
            "katoj",
            &[
                Morpheme::from_str("kat"),
                Morpheme::from_str("o"),
                Morpheme::from_str("j"),
            ],
        );
        assert_eq!(segmented.to_string(), "kat'o'j");

        let empty = Segmented::empty("xyzzyq");
        assert_eq!(empty.to_string(), "");
    }

    #[test]
    fn test_display_scored() {
        let scored = ScoredSegmentation {
            segmentation: vec![Morpheme::from_str("kat"), Morpheme::from_str("o")],
            tags: tags![MarkovTag::Noun, MarkovTag::NounEnding],
            score: Score {
                score: 0.5,
                zero_penalty: 0,
            },
        };
        assert_eq!(
            scored.to_string(),
            "score: (5e-1, 0), segm: kat'o, tags: [Noun, NounEnding]"
        );
    }
}
