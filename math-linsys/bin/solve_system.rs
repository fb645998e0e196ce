use clap::{Parser, ValueEnum};
use math_audio_linsys::{
    LinearSystemError, SystemConfig, partial_pivot_solve, solve_exact, solve_parametrized,
};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(
    name = "solve_system",
    about = "Solve a system of linear equations described in a JSON file"
)]
struct Cli {
    /// Path to the JSON system description
    config: PathBuf,

    /// Solution strategy
    #[arg(long, value_enum, default_value_t = Mode::Parametrized)]
    mode: Mode,

    /// Near-zero tolerance for pivot detection (overrides the file)
    #[arg(long)]
    tolerance: Option<f64>,

    /// Decimal places kept by the numeric solver (overrides the file)
    #[arg(long)]
    decimal_places: Option<u32>,

    /// Print the parsed system before solving
    #[arg(long)]
    show_system: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Mode {
    /// Unique solution only
    Exact,
    /// Base point and direction vectors
    Parametrized,
    /// Partial-pivoting Gauss-Jordan on the augmented matrix
    Numeric,
}

fn main() {
    let args = Cli::parse();

    let mut config = match SystemConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: failed to load {}: {e}", args.config.display());
            process::exit(2);
        }
    };
    if let Some(tolerance) = args.tolerance {
        config.solver.tolerance = tolerance;
    }
    if let Some(places) = args.decimal_places {
        config.solver.decimal_places = places;
    }

    let code = match run(&config, args.mode, args.show_system) {
        Ok(()) => 0,
        Err(LinearSystemError::NoSolution) => {
            println!("No solutions");
            1
        }
        Err(LinearSystemError::InfiniteSolutions) => {
            println!("Infinitely many solutions");
            1
        }
        Err(e) => {
            eprintln!("Error: {e}");
            2
        }
    };
    process::exit(code);
}

fn run(config: &SystemConfig, mode: Mode, show_system: bool) -> Result<(), LinearSystemError> {
    if show_system {
        println!("{}\n", config.to_system()?);
    }

    match mode {
        Mode::Exact => {
            let x = solve_exact(&config.to_system()?, &config.elimination_config())?;
            println!("Solution: {x}");
        }
        Mode::Parametrized => {
            let solution = solve_parametrized(&config.to_system()?, &config.elimination_config())?;
            if solution.is_unique() {
                println!("Unique solution: {}", solution.basepoint);
            } else {
                println!(
                    "Solution set with {} free variable(s):",
                    solution.num_free_variables()
                );
                println!("{solution}");
            }
        }
        Mode::Numeric => {
            let (a, b) = config.to_matrix_parts()?;
            match partial_pivot_solve(&a, &b, &config.partial_pivot_config())? {
                Some(solution) => {
                    println!("Solution: {}", solution.x);
                    println!("Reduced matrix:\n{}", solution.reduced);
                }
                None => return Err(LinearSystemError::NoSolution),
            }
        }
    }
    Ok(())
}
