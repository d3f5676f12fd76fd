//! weight-mirror - mirror vertex-group weights on meshes stored in scene documents
//!
//! The two subcommands mirror the menu commands: `active` mirrors the active
//! vertex group, `all` mirrors every group on the seeding side.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use weight_mirror::{
    MirrorDirection, MirrorHost, MirrorOperator, MirrorPlane, MirrorSettings, VertexMapping,
    float_types::Real, io,
};

#[derive(Parser)]
#[command(name = "weight-mirror")]
#[command(about = "Mirror vertex-group weights across a symmetry plane using a closest point search")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        about = MirrorOperator::ActiveVertexGroup.label(),
        long_about = MirrorOperator::ActiveVertexGroup.description()
    )]
    Active(MirrorArgs),

    #[command(
        about = MirrorOperator::AllVertexGroups.label(),
        long_about = MirrorOperator::AllVertexGroups.description()
    )]
    All(MirrorArgs),

    /// Print the default settings as TOML
    Config,
}

#[derive(Args)]
struct MirrorArgs {
    /// Scene document (JSON)
    scene: PathBuf,

    /// Output scene document (defaults to overwriting the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Mesh object to work on (defaults to the active object)
    #[arg(long)]
    object: Option<String>,

    /// Vertex group to mirror in `active` mode (defaults to the active group)
    #[arg(long)]
    group: Option<String>,

    /// Settings file (TOML); flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// The pattern to use for identifying left groups
    #[arg(long)]
    left: Option<String>,

    /// The pattern to use for identifying right groups
    #[arg(long)]
    right: Option<String>,

    /// The pattern to use for identifying center groups ("" for none)
    #[arg(long)]
    center: Option<String>,

    /// The plane to mirror weights across
    #[arg(long, value_enum)]
    plane: Option<MirrorPlane>,

    /// The direction to mirror across (`all` only)
    #[arg(long, value_enum)]
    direction: Option<MirrorDirection>,

    /// How weights are distributed from closest point hits
    #[arg(long, value_enum)]
    mapping: Option<VertexMapping>,

    /// Width of the linear weight blend around the plane on center groups, in meters
    #[arg(long)]
    blend_width: Option<Real>,

    /// Maximum closest point search distance
    #[arg(long)]
    max_distance: Option<Real>,
}

impl MirrorArgs {
    fn settings(&self) -> Result<MirrorSettings> {
        let mut settings = match &self.config {
            Some(path) => MirrorSettings::load(path)
                .with_context(|| format!("loading settings from {path:?}"))?,
            None => MirrorSettings::default(),
        };
        if let Some(left) = &self.left {
            settings.left_pattern = left.clone();
        }
        if let Some(right) = &self.right {
            settings.right_pattern = right.clone();
        }
        if let Some(center) = &self.center {
            settings.center_pattern = center.clone();
        }
        if let Some(plane) = self.plane {
            settings.mirror_plane = plane;
        }
        if let Some(direction) = self.direction {
            settings.mirror_direction = direction;
        }
        if let Some(mapping) = self.mapping {
            settings.weight_distribution = mapping;
        }
        if let Some(width) = self.blend_width {
            settings.center_blend_width = width;
        }
        if self.max_distance.is_some() {
            settings.max_distance = self.max_distance;
        }
        Ok(settings)
    }
}

fn run(operator: MirrorOperator, args: &MirrorArgs) -> Result<()> {
    let settings = args.settings()?;
    let mut scene = io::read_scene(&args.scene)
        .with_context(|| format!("reading scene {:?}", args.scene))?;

    let object = match &args.object {
        Some(name) => scene
            .find(name)
            .with_context(|| format!("no object named '{name}' in {:?}", args.scene))?,
        None => scene
            .active_object()
            .with_context(|| format!("{:?} has no active object", args.scene))?,
    };
    if let Some(group) = &args.group {
        scene.set_active_group(object, group)?;
    }

    tracing::debug!(operator = operator.id(), ?settings, "running");
    let report = operator.execute(&mut scene, object, &settings)?;
    println!("{report}");

    let output = args.output.as_ref().unwrap_or(&args.scene);
    io::write_scene(&scene, output).with_context(|| format!("writing scene {output:?}"))?;
    tracing::info!("Wrote {:?}", output);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    match &cli.command {
        Commands::Active(args) => run(MirrorOperator::ActiveVertexGroup, args),
        Commands::All(args) => run(MirrorOperator::AllVertexGroups, args),
        Commands::Config => {
            print!("{}", MirrorSettings::default().to_toml_string()?);
            Ok(())
        },
    }
}
