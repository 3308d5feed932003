use anyhow::Result;
use clap::{Parser, Subcommand};
use launcher_icons::icon_gen;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "launcher-icons",
    about = "Generate placeholder Android launcher icons for every flavor and density"
)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solid-colour squares for the customer, barber and admin flavors
    Placeholders {
        /// Android `src` directory holding one source set per flavor.
        #[clap(short, long, value_name = "DIR", default_value = "./android/app/src")]
        output: PathBuf,
    },

    /// Barber pole icon with scissors for the main source set
    Barber {
        /// Android `res` directory of the main source set.
        #[clap(
            short,
            long,
            value_name = "DIR",
            default_value = "./android/app/src/main/res"
        )]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Placeholders { output } => icon_gen::generate_placeholder_icons(&output)?,
        Command::Barber { output } => icon_gen::generate_barber_icons(&output)?,
    };

    Ok(())
}
