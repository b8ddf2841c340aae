//! Security Module
//!
//! 入力ファイルのサイズ制限を実装するモジュール。
//! 解析前に入力全体をメモリへ読み込むため、読み込み量に上限を設けます。

use std::io::Read;

use crate::error::ConvertError;

/// セキュリティ設定
#[derive(Debug, Clone)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 2GB (2_147_483_648 bytes)
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 2_147_483_648, // 2GB
        }
    }
}

impl SecurityConfig {
    /// 入力を上限付きで読み込む
    ///
    /// 上限を1バイトでも超えた時点で読み込みを打ち切り、
    /// `ConvertError::SecurityViolation`を返します。
    pub fn read_bounded<R: Read>(&self, input: R) -> Result<Vec<u8>, ConvertError> {
        let mut buffer = Vec::new();
        let bytes_read = input
            .take(self.max_input_file_size.saturating_add(1))
            .read_to_end(&mut buffer)?;

        if bytes_read as u64 > self.max_input_file_size {
            return Err(ConvertError::SecurityViolation(format!(
                "Input file size exceeds maximum: more than {} bytes",
                self.max_input_file_size
            )));
        }

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_bounded_within_limit() {
        let config = SecurityConfig {
            max_input_file_size: 8,
        };
        let data = config.read_bounded(Cursor::new(vec![1u8; 8])).unwrap();
        assert_eq!(data.len(), 8);
    }

    #[test]
    fn test_read_bounded_exceeds_limit() {
        let config = SecurityConfig {
            max_input_file_size: 8,
        };
        let result = config.read_bounded(Cursor::new(vec![1u8; 9]));
        match result {
            Err(ConvertError::SecurityViolation(msg)) => assert!(msg.contains("8 bytes")),
            _ => panic!("Expected SecurityViolation error"),
        }
    }

    #[test]
    fn test_default_limit() {
        assert_eq!(SecurityConfig::default().max_input_file_size, 2_147_483_648);
    }
}
