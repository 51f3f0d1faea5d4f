//! Clap derive structures for the `dkmap` binary.

use std::path::PathBuf;

use clap::Parser;

/// dkmap -- export the DK switch map as GeoJSON
#[derive(Debug, Parser)]
#[command(
    name = "dkmap",
    version,
    about = "Export the DK switch map as GeoJSON",
    long_about = "Joins switch markers from the site-plan PostGIS database against\n\
        NetBox locations, devices and racks, and writes OUTPUT_DIR/dk.json.\n\n\
        Requires NETBOX_API_TOKEN and DB_URL in the environment.",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Directory to write dk.json into (must exist)
    pub output_dir: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "DKMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_output_dir_and_flags() {
        let cli = Cli::try_parse_from(["dkmap", "-vv", "--timeout", "5", "/srv/map"])
            .expect("valid args");
        assert_eq!(cli.output_dir, PathBuf::from("/srv/map"));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.timeout, Some(5));
    }
}
