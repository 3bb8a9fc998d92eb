use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tabletop_assets::AssetManifest;
use tabletop_common::ResourceRoot;
use tabletop_persist::{FIELD_COUNT, StateFile};
use tabletop_render::{FrameInputs, FrameOptions, PlanTextRenderer, RenderPath, Renderer, plan_frame};
use tabletop_scene::{ProgramState, SceneObject};
use tabletop_tools::CameraInfo;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tabletop-cli", about = "CLI tool for the tabletop scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Resource directory holding textures, meshes and the state file
    #[arg(long, global = true, default_value = "resources")]
    resources: PathBuf,

    /// Program state file [default: <resources>/program_state.txt]
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and scene info
    Info,
    /// Inspect or reset the program state file
    State {
        #[command(subcommand)]
        action: StateAction,
    },
    /// Print the frame plan for the current state
    Plan {
        #[arg(long, default_value_t = RenderPath::Deferred)]
        path: RenderPath,
        /// Include the debug overlay pass
        #[arg(long)]
        overlay: bool,
        #[arg(long)]
        no_skybox: bool,
        /// Viewport aspect ratio
        #[arg(long, default_value_t = 800.0 / 600.0)]
        aspect: f32,
    },
    /// List every asset path and whether it exists
    Assets,
}

#[derive(Subcommand)]
enum StateAction {
    /// Print the state the demo would start with
    Show {
        /// Dump as JSON
        #[arg(long)]
        json: bool,
    },
    /// Overwrite the state file with defaults
    Reset,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let resources = ResourceRoot::new(&cli.resources);
    let state_file = match &cli.state {
        Some(path) => StateFile::new(path),
        None => StateFile::in_dir(resources.root()),
    };

    match cli.command {
        Commands::Info => {
            println!("tabletop-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("resources: {}", resources.root().display());
            println!(
                "state file: {} ({} fields)",
                state_file.path().display(),
                FIELD_COUNT
            );
            let objects: Vec<String> = SceneObject::placed().map(|o| o.name()).collect();
            println!("objects: {}", objects.join(", "));
            let paths: Vec<&str> = RenderPath::ALL.iter().map(|p| p.as_str()).collect();
            println!("render paths: {}", paths.join(", "));
        }
        Commands::State { action } => match action {
            StateAction::Show { json } => {
                let state = state_file.load_or_default();
                if json {
                    println!("{}", serde_json::to_string_pretty(&state)?);
                } else {
                    print_state(&state);
                }
            }
            StateAction::Reset => {
                state_file.save(&ProgramState::default())?;
                println!("reset {}", state_file.path().display());
            }
        },
        Commands::Plan {
            path,
            overlay,
            no_skybox,
            aspect,
        } => {
            let state = state_file.load_or_default();
            let plan = plan_frame(FrameOptions {
                path,
                overlay,
                skybox: !no_skybox,
            });
            let inputs = FrameInputs::from_state(&state, aspect);
            let mut renderer = PlanTextRenderer::new();
            print!("{}", renderer.render(&plan, &inputs)?);
        }
        Commands::Assets => {
            let manifest = AssetManifest::standard(&resources);
            let mut missing = 0;
            for path in manifest.all_paths() {
                let status = if path.is_file() {
                    "ok"
                } else {
                    missing += 1;
                    "MISSING"
                };
                println!("{status:>7}  {}", path.display());
            }
            if missing > 0 {
                println!("{missing} missing; placeholders will be used");
            }
        }
    }

    Ok(())
}

fn print_state(state: &ProgramState) {
    let c = state.clear_color;
    println!("clear color: ({:.3}, {:.3}, {:.3})", c.x, c.y, c.z);
    println!("overlay: {}", state.overlay_enabled);
    println!("spotlight: {}", state.spotlight_enabled);
    println!("{}", CameraInfo::from_camera(&state.camera));
    let p = state.cup_position;
    println!(
        "cup: ({:.2}, {:.2}, {:.2}) scale {:.2}",
        p.x, p.y, p.z, state.cup_scale
    );
    let a = state.point_light.attenuation;
    println!(
        "point light attenuation: {:.3} / {:.3} / {:.3}",
        a.constant, a.linear, a.quadratic
    );
}
