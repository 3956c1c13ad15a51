use adb_snap::prelude::*;

fn main() -> SnapResult<()> {
    let session = SnapSession::new(SnapConfig::default())?;

    // 列出设备
    let devices = session.list_devices()?;
    if devices.is_empty() {
        println!("没有连接的设备");
        return Ok(());
    }

    for device in &devices {
        println!("  ID: {}, 状态: {}", device.id, device.status);
    }

    // 查询第一个在线设备的信息
    let device = session.check_connection()?;
    println!("使用设备: {}", device.id);

    let info = session.device_info()?;
    println!("型号: {} (Android {})", info.model, info.android_version);

    let display = session.display_info()?;
    println!(
        "分辨率: {}x{}px / {}x{}dp @ {}dpi",
        display.physical.0, display.physical.1, display.logical.0, display.logical.1, display.density
    );

    Ok(())
}
