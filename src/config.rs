use std::{
    error::Error,
    fmt::Display,
    fs::File,
    io::{Read, Write},
};

use json::JsonValue;

use crate::dithering::HalftoneMode;

const DEFAULT_BLOCK_SIZE: u32 = 8;
const DEFAULT_MATRIX_SIZE: u32 = 8;

#[derive(Debug)]
pub struct ProcessConfig {
    pub mode: HalftoneMode,
    /// reduce the halftoned result to a strict two-level image and
    /// re-threshold it per channel
    pub binarize: bool,
    /// nearest-neighbor upscale factor applied to the output image
    pub output_scale: u32,
}

impl ProcessConfig {
    fn to_config(json_string: String) -> Result<ProcessConfig, Box<dyn Error>> {
        let parsed = json::parse(json_string.as_str())?;

        let block_size = parsed["block_size"].as_u32().unwrap_or(DEFAULT_BLOCK_SIZE);
        let matrix_size = parsed["matrix_size"].as_u32().unwrap_or(DEFAULT_MATRIX_SIZE);

        let mode: HalftoneMode = match parsed["mode"].as_str() {
            Some(s) => match s {
                "spot" => HalftoneMode::Spot { block_size },
                "diffuse" => HalftoneMode::Diffuse,
                "ordered" => HalftoneMode::Ordered { matrix_size },
                _ => return ConfigError::get("Not recognized mode"),
            },
            None => return ConfigError::get("Couldn't parse mode"),
        };

        let binarize = parsed["binarize"].as_bool().unwrap_or(false);
        let output_scale = parsed["output_scale"].as_u32().unwrap_or(1);
        if output_scale == 0 {
            return ConfigError::get("output_scale must be positive");
        }

        Ok(ProcessConfig {
            mode,
            binarize,
            output_scale,
        })
    }

    fn to_json(config: &ProcessConfig) -> String {
        let mut data = JsonValue::new_object();

        data["mode"] = config.mode.into();
        match config.mode {
            HalftoneMode::Spot { block_size } => data["block_size"] = block_size.into(),
            HalftoneMode::Ordered { matrix_size } => data["matrix_size"] = matrix_size.into(),
            HalftoneMode::Diffuse => {}
        }
        data["binarize"] = config.binarize.into();
        data["output_scale"] = config.output_scale.into();

        data.to_string()
    }

    pub fn read_config(path: &String) -> Result<ProcessConfig, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut buff: Vec<u8> = Vec::new();
        let _ = file.read_to_end(&mut buff)?;

        let json_string = String::from_utf8(buff)?;

        ProcessConfig::to_config(json_string)
    }

    pub fn write_config(&self, path: String) -> Result<(), Box<dyn Error>> {
        let string = ProcessConfig::to_json(self);
        let mut file = File::create(path)?;
        file.write_all(string.as_bytes())?;
        Ok(())
    }
}

impl From<HalftoneMode> for JsonValue {
    fn from(mode: HalftoneMode) -> Self {
        match mode {
            HalftoneMode::Spot { .. } => JsonValue::String(String::from("spot")),
            HalftoneMode::Diffuse => JsonValue::String(String::from("diffuse")),
            HalftoneMode::Ordered { .. } => JsonValue::String(String::from("ordered")),
        }
    }
}

#[derive(Debug)]
pub struct ConfigError {
    msg: String,
}

impl ConfigError {
    fn get(msg: &str) -> Result<ProcessConfig, Box<dyn Error>> {
        Err(Box::new(ConfigError {
            msg: String::from(msg),
        }))
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("ConfigParseError {}", self.msg))
    }
}
impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ordered_mode() {
        let config = ProcessConfig::to_config(
            r#"{ "mode": "ordered", "matrix_size": 4, "binarize": true }"#.to_string(),
        )
        .unwrap();
        assert_eq!(config.mode, HalftoneMode::Ordered { matrix_size: 4 });
        assert!(config.binarize);
        assert_eq!(config.output_scale, 1);
    }

    #[test]
    fn test_parse_defaults() {
        let config = ProcessConfig::to_config(r#"{ "mode": "spot" }"#.to_string()).unwrap();
        assert_eq!(
            config.mode,
            HalftoneMode::Spot {
                block_size: DEFAULT_BLOCK_SIZE
            }
        );
        assert!(!config.binarize);
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert!(ProcessConfig::to_config(r#"{ "mode": "random" }"#.to_string()).is_err());
        assert!(ProcessConfig::to_config(r#"{ "block_size": 8 }"#.to_string()).is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = ProcessConfig {
            mode: HalftoneMode::Spot { block_size: 16 },
            binarize: true,
            output_scale: 2,
        };
        let parsed = ProcessConfig::to_config(ProcessConfig::to_json(&config)).unwrap();
        assert_eq!(parsed.mode, config.mode);
        assert_eq!(parsed.binarize, config.binarize);
        assert_eq!(parsed.output_scale, config.output_scale);
    }
}
