use thiserror::Error;

/// 截图会话相关的错误类型
#[derive(Debug, Error)]
pub enum SnapError {
    /// ADB 可执行文件缺失
    #[error("找不到 ADB 可执行文件: {0}")]
    ToolNotFound(String),

    /// ADB 命令以非零状态退出
    #[error("ADB 命令失败: {0}")]
    CommandFailed(String),

    /// 设备通信错误
    #[error("设备通信错误: {0}")]
    DeviceError(String),

    /// 没有在线设备
    #[error("没有已连接的设备: {0}")]
    DeviceNotFound(String),

    /// 本地文件操作错误
    #[error("文件操作错误: {0}")]
    FileError(String),

    /// 命令输出中缺少预期的标签
    #[error("解析错误: {0}")]
    ParseError(String),
}

// 为标准错误类型实现 From trait，简化错误处理
impl From<std::io::Error> for SnapError {
    fn from(error: std::io::Error) -> Self {
        SnapError::FileError(error.to_string())
    }
}

impl From<std::num::ParseIntError> for SnapError {
    fn from(error: std::num::ParseIntError) -> Self {
        SnapError::ParseError(format!("数字解析错误: {}", error))
    }
}

// 添加结果类型别名简化使用
pub type SnapResult<T> = Result<T, SnapError>;
