use clap::Args;

use crate::color::{contrast_ratio, is_accessible, Rgb, WcagLevel};
use crate::error::Result;
use crate::output::Printer;

/// Check the WCAG contrast of a colour pair
#[derive(Args, Debug)]
pub struct ContrastArgs {
    /// Foreground colour
    pub foreground: String,

    /// Background colour
    pub background: String,

    /// WCAG conformance level to check against
    #[arg(long, default_value = "AA")]
    pub level: String,
}

pub fn run(args: ContrastArgs, printer: &Printer) -> Result<()> {
    let foreground = Rgb::from_hex(&args.foreground)?;
    let background = Rgb::from_hex(&args.background)?;
    let level: WcagLevel = args.level.parse()?;

    let ratio = contrast_ratio(foreground, background);
    let passed = is_accessible(foreground, background, level);

    printer.status(
        "Checking",
        &format!("{} on {} against WCAG {}", foreground, background, level),
    );
    println!("{:.2}:1 {}", ratio, printer.verdict(passed));

    Ok(())
}
