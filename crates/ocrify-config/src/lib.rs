use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::ocr::OcrConfig;

pub mod dictionary;
pub mod ocr;

#[derive(Serialize, Deserialize, Clone)]
pub struct Config {
    pub ocr: OcrConfig,
    pub dictionary: DictionaryConfig,
}

impl Config {
    pub fn new() -> Self {
        Config {
            ocr: OcrConfig::new(),
            dictionary: DictionaryConfig::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
