//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::{ModeArg, NicheArg, PlatformArg, RatioArg};

/// AI video prompt generator driving a rotating Gemini key pool
#[derive(Parser, Debug)]
#[command(name = "vidgen")]
#[command(version, about = "Video prompt generator for Kling, Veo, Luma and Hailuo", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate API keys and record the live ones
    Validate {
        /// Raw keys, comma- or newline-separated
        #[arg(long)]
        keys: Option<String>,

        /// File containing raw keys
        #[arg(long)]
        keys_file: Option<PathBuf>,

        /// Do not record live keys in the history file
        #[arg(long)]
        no_save: bool,
    },

    /// Generate a batch of video prompts
    Generate {
        /// Video idea (creative mode) or product description (affiliate mode)
        #[arg(long, short)]
        topic: String,

        /// Target platform
        #[arg(long, short, default_value = "kling")]
        platform: PlatformArg,

        /// Generation mode
        #[arg(long, short, default_value = "creative")]
        mode: ModeArg,

        /// Content niche selecting the camera-movement catalog (creative mode)
        #[arg(long, default_value = "cinematic")]
        niche: NicheArg,

        /// Marketing angle repeated across the batch (affiliate mode)
        #[arg(long)]
        angle: Option<String>,

        /// Number of prompt variations (1-10); defaults from config
        #[arg(long, short, value_parser = clap::value_parser!(u8).range(1..=10))]
        quantity: Option<u8>,

        /// Aspect ratio for platforms that take it in the prompt
        #[arg(long, default_value = "vertical")]
        ratio: RatioArg,

        /// Frame prompts for an externally supplied reference image (image-to-video)
        #[arg(long)]
        i2v: bool,

        /// Skip the stock negative prompt
        #[arg(long)]
        no_negative: bool,

        /// Raw keys to validate and use for this batch
        #[arg(long)]
        keys: Option<String>,

        /// File containing raw keys
        #[arg(long)]
        keys_file: Option<PathBuf>,

        /// Reuse previously validated keys from the history file
        #[arg(long)]
        from_history: bool,

        /// Write the export text to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Key history management
    Keys {
        #[command(subcommand)]
        action: KeysAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum KeysAction {
    /// Show saved keys (masked)
    Show,
    /// Delete the history file
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_generate(extra: &[&str]) -> Args {
        let mut argv = vec!["vidgen", "generate", "--topic", "neon samurai"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_generate_defaults() {
        let args = parse_generate(&[]);
        match args.command {
            Command::Generate {
                platform,
                mode,
                niche,
                quantity,
                ratio,
                i2v,
                no_negative,
                from_history,
                ..
            } => {
                assert_eq!(platform, PlatformArg::Kling);
                assert_eq!(mode, ModeArg::Creative);
                assert_eq!(niche, NicheArg::Cinematic);
                assert!(quantity.is_none());
                assert_eq!(ratio, RatioArg::Vertical);
                assert!(!i2v);
                assert!(!no_negative);
                assert!(!from_history);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_generate_quantity_in_range() {
        let args = parse_generate(&["--quantity", "10"]);
        match args.command {
            Command::Generate { quantity, .. } => assert_eq!(quantity, Some(10)),
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_generate_quantity_out_of_range_rejected() {
        let result = Args::try_parse_from([
            "vidgen", "generate", "--topic", "t", "--quantity", "11",
        ]);
        assert!(result.is_err());

        let result = Args::try_parse_from([
            "vidgen", "generate", "--topic", "t", "--quantity", "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_generate_platform_values() {
        for (value, expected) in [
            ("kling", PlatformArg::Kling),
            ("veo", PlatformArg::Veo),
            ("luma", PlatformArg::Luma),
            ("hailuo", PlatformArg::Hailuo),
        ] {
            let args = parse_generate(&["--platform", value]);
            match args.command {
                Command::Generate { platform, .. } => assert_eq!(platform, expected),
                _ => panic!("expected generate command"),
            }
        }
    }

    #[test]
    fn test_generate_affiliate_mode_with_angle() {
        let args = parse_generate(&["--mode", "affiliate", "--angle", "ASMR Unboxing"]);
        match args.command {
            Command::Generate { mode, angle, .. } => {
                assert_eq!(mode, ModeArg::Affiliate);
                assert_eq!(angle.as_deref(), Some("ASMR Unboxing"));
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_generate_i2v_flag() {
        let args = parse_generate(&["--i2v"]);
        match args.command {
            Command::Generate { i2v, .. } => assert!(i2v),
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_validate_defaults() {
        let args = Args::parse_from(["vidgen", "validate"]);
        match args.command {
            Command::Validate {
                keys,
                keys_file,
                no_save,
            } => {
                assert!(keys.is_none());
                assert!(keys_file.is_none());
                assert!(!no_save);
            }
            _ => panic!("expected validate command"),
        }
    }

    #[test]
    fn test_keys_subcommands() {
        let args = Args::parse_from(["vidgen", "keys", "show"]);
        assert!(matches!(
            args.command,
            Command::Keys {
                action: KeysAction::Show
            }
        ));

        let args = Args::parse_from(["vidgen", "keys", "clear"]);
        assert!(matches!(
            args.command,
            Command::Keys {
                action: KeysAction::Clear
            }
        ));
    }

    #[test]
    fn test_config_flag() {
        let args = Args::parse_from(["vidgen", "-c", "/tmp/vidgen.toml", "keys", "show"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/vidgen.toml")));
    }
}
