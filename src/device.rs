use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::config::SnapConfig;
use crate::error::{SnapError, SnapResult};

/// ADB 设备状态枚举
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceStatus {
    Online,
    Offline,
    Unauthorized,
    Other(String),
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceStatus::Online => write!(f, "online"),
            DeviceStatus::Offline => write!(f, "offline"),
            DeviceStatus::Unauthorized => write!(f, "unauthorized"),
            DeviceStatus::Other(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for DeviceStatus {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "device" | "online" => DeviceStatus::Online,
            "offline" => DeviceStatus::Offline,
            "unauthorized" => DeviceStatus::Unauthorized,
            _ => DeviceStatus::Other(s.to_string()),
        }
    }
}

/// ADB 设备结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdbDevice {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    pub status: DeviceStatus,
}

impl AdbDevice {
    /// 创建新设备实例
    pub fn new(id: &str, status: impl Into<DeviceStatus>) -> Self {
        Self {
            id: id.to_string(),
            model: None,
            product: None,
            status: status.into(),
        }
    }

    /// 检查设备是否在线
    pub fn is_online(&self) -> bool {
        self.status == DeviceStatus::Online
    }

    /// 设置设备型号
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = Some(model.to_string());
        self
    }

    /// 设置设备产品信息
    pub fn with_product(mut self, product: &str) -> Self {
        self.product = Some(product.to_string());
        self
    }
}

/// 设备基础信息，按需查询，不缓存
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// 设备型号 (ro.product.model)
    pub model: String,
    /// Android 版本 (ro.build.version.release)
    pub android_version: String,
}

/// 截图会话主结构体
///
/// 持有输出目录和单调递增的截图计数器。所有操作都是同步阻塞的，
/// 计数器只被单个执行线程访问。
#[derive(Clone, Debug)]
pub struct SnapSession {
    pub config: SnapConfig,
    /// 设备端临时文件路径，会话创建时解析一次
    pub(crate) device_temp_path: String,
    /// 截图计数器，每次命名时递增，无论命名方式和捕获结果
    pub(crate) screenshot_count: u32,
}

impl SnapSession {
    /// 创建新的截图会话并确保输出目录存在
    pub fn new(config: SnapConfig) -> SnapResult<Self> {
        fs::create_dir_all(&config.output_dir).map_err(|e| {
            SnapError::FileError(format!(
                "无法创建输出目录 {}: {}",
                config.output_dir.display(),
                e
            ))
        })?;

        let device_temp_path = config
            .device_temp_path
            .clone()
            .unwrap_or_else(crate::utils::session_temp_path);

        Ok(Self {
            config,
            device_temp_path,
            screenshot_count: 0,
        })
    }

    /// 获取截图保存目录
    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    /// 获取当前截图计数
    pub fn screenshot_count(&self) -> u32 {
        self.screenshot_count
    }

    /// 获取设备端临时文件路径
    pub fn device_temp_path(&self) -> &str {
        &self.device_temp_path
    }

    /// 目标设备序列号；空字符串表示使用默认设备
    pub(crate) fn serial(&self) -> &str {
        self.config.device_serial.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SnapConfigBuilder;

    #[test]
    fn status_parses_devices_output_words() {
        assert_eq!(DeviceStatus::from("device"), DeviceStatus::Online);
        assert_eq!(DeviceStatus::from("offline"), DeviceStatus::Offline);
        assert_eq!(DeviceStatus::from("unauthorized"), DeviceStatus::Unauthorized);
        assert_eq!(
            DeviceStatus::from("sideload"),
            DeviceStatus::Other("sideload".to_string())
        );
    }

    #[test]
    fn unauthorized_device_is_not_online() {
        let device = AdbDevice::new("R5CT30XXXX", "unauthorized");
        assert!(!device.is_online());
    }

    #[test]
    fn session_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("screens");
        let config = SnapConfigBuilder::default().output_dir(&output).build();

        let session = SnapSession::new(config).unwrap();
        assert!(output.is_dir());
        assert_eq!(session.screenshot_count(), 0);
    }

    #[test]
    fn session_generates_unique_temp_path_when_unset() {
        let dir = tempfile::tempdir().unwrap();
        let config = SnapConfigBuilder::default()
            .output_dir(dir.path().join("a"))
            .build();
        let other = SnapConfigBuilder::default()
            .output_dir(dir.path().join("b"))
            .build();

        let first = SnapSession::new(config).unwrap();
        let second = SnapSession::new(other).unwrap();
        assert_ne!(first.device_temp_path(), second.device_temp_path());
    }

    #[test]
    fn session_honors_fixed_temp_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = SnapConfigBuilder::default()
            .output_dir(dir.path().join("screens"))
            .device_temp_path("/sdcard/fixed.png")
            .build();

        let session = SnapSession::new(config).unwrap();
        assert_eq!(session.device_temp_path(), "/sdcard/fixed.png");
    }
}
