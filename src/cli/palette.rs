use clap::{Args, ValueEnum};

use crate::color::{self, Scheme, DEFAULT_BASE};
use crate::error::Result;
use crate::output::Printer;

/// Generate brand palettes from a base colour
#[derive(Args, Debug)]
pub struct PaletteArgs {
    /// Base hex colour, e.g. #6366f1
    #[arg(default_value = DEFAULT_BASE)]
    pub base: String,

    /// Scheme to generate, or "all" for every scheme
    #[arg(long, default_value = "all")]
    pub scheme: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Css)]
    pub format: Format,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Format {
    Css,
    Json,
    Tailwind,
}

pub fn run(args: PaletteArgs, printer: &Printer) -> Result<()> {
    let palettes = if args.scheme == "all" {
        color::generate_all(&args.base)?
    } else {
        let scheme: Scheme = args.scheme.parse()?;
        vec![color::generate(scheme, &args.base)?]
    };

    printer.status(
        "Generating",
        &format!("{} palette(s) from {}", palettes.len(), args.base),
    );

    match args.format {
        Format::Json => {
            if let [palette] = palettes.as_slice() {
                println!("{}", color::to_json(palette)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&palettes).map_err(
                    |e| crate::error::PortalError::Parse {
                        message: format!("Failed to serialize palettes: {}", e),
                        help: None,
                    },
                )?);
            }
        }
        Format::Css => {
            for palette in &palettes {
                println!("/* {} */", palette.name);
                print!("{}", color::to_css(palette));
            }
        }
        Format::Tailwind => {
            for palette in &palettes {
                println!("// {}", palette.name);
                print!("{}", color::to_tailwind(palette));
            }
        }
    }

    Ok(())
}
