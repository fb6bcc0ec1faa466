//! Lists connected devices, opens one and prints what it reports about itself.
//!
//! Usage: `discovery-check [device-index]`

use std::io::{BufRead, Write};

fn select_device(count: usize) -> discovery::Result<Option<usize>> {
    if let Some(arg) = std::env::args().nth(1) {
        return match arg.parse::<usize>() {
            Ok(index) if index < count => Ok(Some(index)),
            _ => {
                println!("Invalid device index, use 0 to {}", count - 1);
                Ok(None)
            }
        }
    }
    if count == 1 {
        println!();
        println!("Only one device connected, opening it...");
        return Ok(Some(0))
    }

    println!();
    print!("Select a device to open: ");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    if let Err(err) = std::io::stdin().lock().read_line(&mut line) {
        log::warn!("cannot read selection: {}", err);
    }
    match line.trim().parse::<usize>() {
        Ok(index) if index < count => Ok(Some(index)),
        _ => {
            println!("Invalid device index, use 0 to {}", count - 1);
            Ok(None)
        }
    }
}

fn main() -> discovery::Result<()> {
    env_logger::init();

    let mut device = discovery::Device::new();
    let devices = device.enumerate()?;
    if devices.is_empty() {
        println!("No connected devices found");
        return Ok(())
    }

    println!("Enumerated Devices: {}", devices.len());
    for entry in &devices {
        let status = if entry.opened { "in use" } else { "available" };
        let mut name = entry.name.clone();
        if !entry.user_name.is_empty() && entry.user_name != entry.name {
            name += &format!(" ({})", entry.user_name);
        }
        println!("  {}) {:<35}  {:<20}  {}", entry.index, name, entry.serial, status);
    }

    let Some(index) = select_device(devices.len())? else {
        return Ok(())
    };
    let info = device.open_index(index, 0)?.clone();

    println!();
    println!("[ Device Info ]");
    println!("  Name:                 {}", info.name);
    println!("  Serial Number:        {}", info.serial);
    println!("  SDK Version:          {}", info.version);
    println!("  Analog In Channels:   {}", info.analog_in_channels);
    println!("  Analog Out Channels:  {}", info.analog_out_channels);
    println!("  Digital In Channels:  {}", info.digital_in_channels);
    println!("  Digital Out Channels: {}", info.digital_out_channels);
    println!("  Max Buffer Size:      {}", info.max_analog_in_buffer_size);
    println!("  ADC Resolution:       {} bits", info.analog_in_bits);
    match device.temperature() {
        Ok(celsius) if celsius > 0.0 => println!("  Board Temperature:    {:.1} °C", celsius),
        Ok(_) => (),
        Err(err) => log::warn!("cannot read temperature: {}", err),
    }

    let configs = device.configs(index)?;
    if !configs.is_empty() {
        let rule = "-".repeat(88);
        println!();
        println!("[ Available Configurations: {} ]", configs.len());
        println!("  {}", rule);
        println!("  {:<6}  {:<6} {:<6} {:<6} {:<6} {:<6} {:<6} {:<8} {:<8} {:<8} {:<8}",
                 "Config", "AI-Ch", "AO-Ch", "IO-Ch", "DI-Ch", "DO-Ch", "DIO",
                 "AI-Buf", "AO-Buf", "DI-Buf", "DO-Buf");
        println!("  {}", rule);
        for config in &configs {
            println!("  {:<6}  {:<6} {:<6} {:<6} {:<6} {:<6} {:<6} {:<8} {:<8} {:<8} {:<8}",
                     config.index,
                     config.analog_in_channels, config.analog_out_channels, config.analog_io_channels,
                     config.digital_in_channels, config.digital_out_channels, config.digital_io_channels,
                     config.analog_in_buffer_size, config.analog_out_buffer_size,
                     config.digital_in_buffer_size, config.digital_out_buffer_size);
        }
        println!("  {}", rule);
    }

    device.close()?;
    println!();
    println!("Device is connected and operational.");
    Ok(())
}
