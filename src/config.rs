use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 截图会话配置结构体
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SnapConfig {
    /// ADB 可执行文件路径
    pub adb_path: PathBuf,
    /// 截图保存目录
    pub output_dir: PathBuf,
    /// 设备端临时文件路径；None 时每个会话生成唯一路径
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_temp_path: Option<String>,
    /// 目标设备序列号；None 时使用第一个在线设备
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_serial: Option<String>,
    /// 额外的 ADB 全局参数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_args: Option<Vec<String>>,
}

impl Default for SnapConfig {
    fn default() -> Self {
        SnapConfig {
            adb_path: PathBuf::from("adb"),
            output_dir: PathBuf::from("screenshots"),
            device_temp_path: None,
            device_serial: None,
            additional_args: None,
        }
    }
}

/// 截图会话配置构建器
#[derive(Default)]
pub struct SnapConfigBuilder {
    adb_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    device_temp_path: Option<String>,
    device_serial: Option<String>,
    additional_args: Option<Vec<String>>,
}

impl SnapConfigBuilder {
    /// 设置 ADB 可执行文件路径
    pub fn adb_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.adb_path = Some(path.into());
        self
    }

    /// 设置截图保存目录
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// 固定设备端临时文件路径
    pub fn device_temp_path(mut self, path: &str) -> Self {
        self.device_temp_path = Some(path.to_string());
        self
    }

    /// 指定目标设备序列号
    pub fn device_serial(mut self, serial: &str) -> Self {
        self.device_serial = Some(serial.to_string());
        self
    }

    /// 添加额外命令行参数
    pub fn add_arg(mut self, arg: &str) -> Self {
        if self.additional_args.is_none() {
            self.additional_args = Some(Vec::new());
        }

        if let Some(args) = &mut self.additional_args {
            args.push(arg.to_string());
        }

        self
    }

    /// 构建会话配置
    pub fn build(self) -> SnapConfig {
        let default = SnapConfig::default();

        SnapConfig {
            adb_path: self.adb_path.unwrap_or(default.adb_path),
            output_dir: self.output_dir.unwrap_or(default.output_dir),
            device_temp_path: self.device_temp_path,
            device_serial: self.device_serial,
            additional_args: self.additional_args,
        }
    }
}
