use crate::cli::ImCommands;
use crate::services::im_mode::{self, DevicePaths};

pub fn handle_im_commands(command: ImCommands) -> anyhow::Result<()> {
    let paths = DevicePaths::resolve()?;
    match command {
        ImCommands::Enabled => {
            if im_mode::is_enabled(&paths)? {
                println!("Module host management mode is already enabled");
                return Ok(());
            }
            im_mode::enable(&paths, &im_mode::reference_device_dir())
        }
        ImCommands::Disabled => {
            if !im_mode::is_enabled(&paths)? {
                println!("Module host management mode is already disabled");
                return Ok(());
            }
            im_mode::disable(&paths)
        }
    }
}
