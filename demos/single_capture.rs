use adb_snap::prelude::*;

fn main() -> SnapResult<()> {
    let config = SnapConfigBuilder::default().output_dir("demo_screens").build();
    let mut session = SnapSession::new(config)?;

    // 检查连接
    let device = session.check_connection()?;
    println!("使用设备: {}", device.id);

    // 抓取一张命名截图
    let path = session.capture_screenshot(Some("demo"))?;
    println!("截图已保存到: {}", path.display());

    Ok(())
}
