use serde::{
    Deserialize,
    Deserializer,
};

use crate::core::KanjiRecord;

/// Top-level response of the list endpoints. A missing `kanjis` field is an
/// empty list, not a decode failure.
#[derive(Debug, Deserialize)]
pub struct KanjiListResponse {
    #[serde(default)]
    pub kanjis: Vec<ApiKanji>,
}

/// One kanji object as the API sends it. Numeric fields arrive as strings
/// ("13"), numbers, empty strings or null depending on the record, so they
/// all decode through the tolerant path below.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKanji {
    #[serde(default)]
    pub kanji: String,
    #[serde(default)]
    pub unicode: String,
    #[serde(default, deserialize_with = "number_or_numeric_string")]
    pub grade: Option<u32>,
    #[serde(default, deserialize_with = "number_or_numeric_string")]
    pub stroke_count: Option<u32>,
    #[serde(default, deserialize_with = "number_or_numeric_string")]
    pub freq: Option<u32>,
    #[serde(default, deserialize_with = "number_or_numeric_string")]
    pub jlpt: Option<u32>,
    #[serde(default)]
    pub meanings: MeaningSet,
    #[serde(default)]
    pub readings: ReadingSet,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeaningSet {
    #[serde(default)]
    pub en: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReadingSet {
    #[serde(default)]
    pub ja_on: Vec<String>,
    #[serde(default)]
    pub ja_kun: Vec<String>,
}

fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u32),
        Text(String),
    }

    // An empty or non-numeric string means the record has no usable value.
    Ok(match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(NumberOrString::Number(number)) => Some(number),
        Some(NumberOrString::Text(text)) => text.trim().parse().ok(),
        None => None,
    })
}

impl From<ApiKanji> for KanjiRecord {
    fn from(raw: ApiKanji) -> Self {
        KanjiRecord {
            character: raw.kanji,
            on_readings: raw.readings.ja_on,
            kun_readings: raw.readings.ja_kun,
            meanings: raw.meanings.en,
            stroke_count: raw.stroke_count.unwrap_or_default(),
            frequency_rank: raw.freq,
        }
    }
}
