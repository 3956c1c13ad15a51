mod error;
mod config;
mod device;
mod cmd;

// 功能模块
mod capture;
mod display;
pub mod interactive;
pub mod utils;

// 导出主要类型
pub use config::{SnapConfig, SnapConfigBuilder};
pub use device::{AdbDevice, DeviceInfo, DeviceStatus, SnapSession};
pub use display::DisplayInfo;
pub use error::{SnapError, SnapResult};
pub use interactive::Action;

// 便利的预导出模块
pub mod prelude {
    pub use super::{
        AdbDevice, DeviceInfo, DisplayInfo, SnapConfig, SnapConfigBuilder, SnapError, SnapResult,
        SnapSession,
    };
}
