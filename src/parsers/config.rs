//! # JSON 配置加载
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 使用
//! - 使用 `models/config.rs`
//! - 使用 `serde_json`

use crate::error::{Result, StogError};
use crate::models::StogConfig;
use std::fs;
use std::path::Path;

/// 读取并解析 JSON 配置文件
///
/// 只做反序列化，参数校验由 [`StogConfig::validate`] 完成。
pub fn load_config(path: &Path) -> Result<StogConfig> {
    if !path.exists() {
        return Err(StogError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| StogError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| StogError::ConfigParseError {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "Files": [{{ "Filename": "a.sq", "Qmin": 0.5, "Qmax": 20.0 }}],
                "NumberDensity": 0.1,
                "<b_coh>^2": 1.0,
                "LorchFlag": true,
                "FourierFilter": {{ "Cutoff": 1.5 }}
            }}"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.files.len(), 1);
        assert_eq!(config.files[0].reciprocal_function, "S(Q)");
        assert!(config.lorch);
        assert_eq!(config.filter_cutoff(), Some(1.5));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/stog.json")).unwrap_err();
        assert!(matches!(err, StogError::FileNotFound { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ \"Files\": [").unwrap();
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, StogError::ConfigParseError { .. }));
    }
}
