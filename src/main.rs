//! Loopsmith - procedural hip-hop MIDI loop generator
//!
//! # Commands
//!
//! - `loopsmith beat` - Generate a full hip-hop loop (optionally an extended version too)
//! - `loopsmith components` - Pick components from a menu, one file per set
//! - `loopsmith melody` - Generate a standalone four-bar melody with a second voice
//!
//! All commands accept `--seed` for reproducible output and `--out-dir`
//! for the destination directory.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;

use loopsmith::{
    generate_beat, generate_melody_loop, output_path_for, scales, Component, GenerateError,
    GenerateRequest, MelodyRequest, Style, TempoBucket, TempoMarking,
};

/// Procedural hip-hop MIDI loop generator
#[derive(Parser)]
#[command(name = "loopsmith")]
#[command(about = "Procedural hip-hop MIDI loop generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RNG seed (same seed => same files)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Directory for generated files
    #[arg(long, global = true, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a full hip-hop loop
    Beat(BeatArgs),

    /// Pick beat components from a menu, one file per set
    Components(ComponentsArgs),

    /// Generate a standalone four-bar melody with a second voice
    Melody(MelodyArgs),
}

#[derive(Args)]
struct BeatArgs {
    /// Loop length in measures
    #[arg(long, default_value_t = 4)]
    measures: u32,

    /// Also write an extended loop at twice the length
    #[arg(long)]
    extended: bool,
}

#[derive(Args)]
struct ComponentsArgs {
    /// Menu choice 1-8; prompts interactively when omitted
    #[arg(long)]
    choice: Option<String>,

    /// Loop length in measures
    #[arg(long, default_value_t = 4)]
    measures: u32,
}

#[derive(Args)]
struct MelodyArgs {
    /// Melody flavor
    #[arg(long, value_enum, default_value_t = Flavor::Hiphop)]
    flavor: Flavor,

    /// Melody length in measures
    #[arg(long, default_value_t = 4)]
    measures: u32,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Flavor {
    /// Pentatonic melody in the hip-hop tempo pocket
    Hiphop,

    /// Major/minor melody across the classical tempo range
    Classic,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let result = match &cli.command {
        Commands::Beat(args) => run_beat(&cli, args, &mut rng),
        Commands::Components(args) => run_components(&cli, args, &mut rng),
        Commands::Melody(args) => run_melody(&cli, args, &mut rng),
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run_beat(cli: &Cli, args: &BeatArgs, rng: &mut StdRng) -> Result<(), GenerateError> {
    let style = Style::pick(rng);
    let (tempo, bucket) = TempoBucket::pick(rng);
    println!(
        "Generating a {} beat at {} BPM ({})",
        style.name(),
        tempo,
        bucket.name()
    );

    let request = GenerateRequest {
        output: cli.out_dir.join("hiphop_beat.mid"),
        measures: args.measures,
        tempo,
        scale: style.scale().to_vec(),
        components: None,
    };
    println!("{}", generate_beat(&request, rng)?);

    if args.extended {
        println!(
            "Generating an extended {} beat at {} BPM",
            style.name(),
            tempo
        );
        let extended = GenerateRequest {
            output: cli.out_dir.join("hiphop_extended.mid"),
            measures: args.measures * 2,
            ..request
        };
        println!("{}", generate_beat(&extended, rng)?);
    }

    Ok(())
}

fn run_components(cli: &Cli, args: &ComponentsArgs, rng: &mut StdRng) -> Result<(), GenerateError> {
    let choice = match &args.choice {
        Some(choice) => choice.clone(),
        None => prompt_choice()?,
    };

    let component_sets = match menu_selection(&choice) {
        Some(sets) => sets,
        None => {
            // Reported, nothing written, not fatal
            println!("Invalid choice. Please pick a number from 1 to 8.");
            return Ok(());
        }
    };

    let style = Style::pick(rng);
    let (tempo, bucket) = TempoBucket::pick(rng);
    println!(
        "Generating {} components at {} BPM ({})",
        style.name(),
        tempo,
        bucket.name()
    );

    let mut created = Vec::new();
    for components in &component_sets {
        let output = output_path_for(&cli.out_dir, components);
        let names = components.iter().map(|c| c.name().to_string()).collect();
        let request = GenerateRequest {
            output: output.clone(),
            measures: args.measures,
            tempo,
            scale: style.scale().to_vec(),
            components: Some(names),
        };
        println!("{}", generate_beat(&request, rng)?);
        created.push(output);
    }

    println!("\nCreated {} file(s):", created.len());
    for path in &created {
        println!("- {}", path.display());
    }
    println!("\nImport them into your DAW via File > Import > MIDI file.");

    Ok(())
}

fn run_melody(cli: &Cli, args: &MelodyArgs, rng: &mut StdRng) -> Result<(), GenerateError> {
    // Two files per run: a major melody and a minor one, each with its
    // own tempo draw and a doubled second voice.
    let (major_scale, minor_scale) = match args.flavor {
        Flavor::Hiphop => (scales::MAJOR_PENTATONIC, scales::MINOR_PENTATONIC),
        Flavor::Classic => (scales::MAJOR, scales::NATURAL_MINOR),
    };

    let (major_tempo, major_label) = pick_melody_tempo(args.flavor, rng);
    println!("Generating a major melody at {} BPM ({})", major_tempo, major_label);
    let major = MelodyRequest {
        output: cli.out_dir.join("four_bar_melody.mid"),
        measures: args.measures,
        tempo: major_tempo,
        scale: major_scale.to_vec(),
        base_note: 60, // C4
        second_voice_offset: Some(-12),
    };
    println!("{}", generate_melody_loop(&major, rng)?);

    let (minor_tempo, minor_label) = pick_melody_tempo(args.flavor, rng);
    println!("Generating a minor melody at {} BPM ({})", minor_tempo, minor_label);
    let minor = MelodyRequest {
        output: cli.out_dir.join("four_bar_melody_minor.mid"),
        measures: args.measures,
        tempo: minor_tempo,
        scale: minor_scale.to_vec(),
        base_note: 57, // A3
        second_voice_offset: Some(12),
    };
    println!("{}", generate_melody_loop(&minor, rng)?);

    Ok(())
}

fn pick_melody_tempo(flavor: Flavor, rng: &mut StdRng) -> (u16, &'static str) {
    match flavor {
        Flavor::Hiphop => {
            let (tempo, bucket) = TempoBucket::pick(rng);
            (tempo, bucket.name())
        }
        Flavor::Classic => {
            let (tempo, marking) = TempoMarking::pick(rng);
            (tempo, marking.name())
        }
    }
}

/// Print the component menu and read one line from stdin
fn prompt_choice() -> Result<String, GenerateError> {
    println!("Hip-hop beat component generator");
    println!("--------------------------------");
    println!("Choose which components to generate:");
    println!("1 - Full drum kit (all drums in one file)");
    println!("2 - Kick");
    println!("3 - Snare/clap");
    println!("4 - Hi-hats");
    println!("5 - Bass line");
    println!("6 - Melody");
    println!("7 - All drum components separately (3 files)");
    println!("8 - All beat components separately (5 files)");
    print!("Your choice (1-8): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Map a menu choice to the component sets to generate, one file per set
fn menu_selection(choice: &str) -> Option<Vec<Vec<Component>>> {
    let sets = match choice {
        "1" => vec![Component::DRUMS.to_vec()],
        "2" => vec![vec![Component::Kick]],
        "3" => vec![vec![Component::Snare]],
        "4" => vec![vec![Component::Hihat]],
        "5" => vec![vec![Component::Bass]],
        "6" => vec![vec![Component::Melody]],
        "7" => Component::DRUMS.iter().map(|&c| vec![c]).collect(),
        "8" => Component::ALL.iter().map(|&c| vec![c]).collect(),
        _ => return None,
    };
    Some(sets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_selection_file_counts() {
        assert_eq!(menu_selection("1").unwrap().len(), 1);
        assert_eq!(menu_selection("1").unwrap()[0].len(), 3);
        assert_eq!(menu_selection("7").unwrap().len(), 3);
        assert_eq!(menu_selection("8").unwrap().len(), 5);
        assert!(menu_selection("9").is_none());
        assert!(menu_selection("").is_none());
        assert!(menu_selection("drums").is_none());
    }

    #[test]
    fn test_menu_singles_match_components() {
        for (choice, component) in [
            ("2", Component::Kick),
            ("3", Component::Snare),
            ("4", Component::Hihat),
            ("5", Component::Bass),
            ("6", Component::Melody),
        ] {
            assert_eq!(menu_selection(choice).unwrap(), vec![vec![component]]);
        }
    }
}
