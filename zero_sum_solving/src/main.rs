use std::convert::TryFrom;
use std::fmt;
use std::process;
use std::str::FromStr;
use structopt::StructOpt;

use efg_tree::game::{History, Player};
use game_generators::kuhn::Kuhn;
use game_generators::matrix::MatrixGame;
use game_generators::simple_poker::SimplePoker;
use libgt::SequenceFormBuilder;
use optimizers::MinilpSolver;
use zero_sum_solving::{solve_program, Error, SolverConfig};

use log::{error, info};

#[derive(Debug, Copy, Clone)]
enum GameKind {
    SimplePoker,
    Kuhn,
    RockPaperScissors,
    MatchingPennies,
}

impl FromStr for GameKind {
    type Err = String;

    fn from_str(s: &str) -> Result<GameKind, String> {
        match s {
            "simple-poker" => Ok(GameKind::SimplePoker),
            "kuhn" => Ok(GameKind::Kuhn),
            "rps" => Ok(GameKind::RockPaperScissors),
            "matching-pennies" => Ok(GameKind::MatchingPennies),
            _ => Err(format!(
                "unknown game '{}', expected one of simple-poker, kuhn, rps, matching-pennies",
                s
            )),
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            GameKind::SimplePoker => "simple-poker",
            GameKind::Kuhn => "kuhn",
            GameKind::RockPaperScissors => "rps",
            GameKind::MatchingPennies => "matching-pennies",
        };
        write!(f, "{}", name)
    }
}

#[derive(StructOpt, Debug)]
#[structopt(name = "ZeroSumSolver")]
struct Opt {
    // Built-in game to solve
    #[structopt(short = "g", long = "game", default_value = "simple-poker")]
    game: GameKind,

    // Solving player, 0 or 1
    #[structopt(short = "p", long = "player", default_value = "0")]
    player: usize,

    // Tolerance used when validating the realization plan
    #[structopt(short = "t", long = "tolerance", default_value = "1e-6")]
    tolerance: f64,

    #[structopt(long = "no-validate")]
    no_validate: bool,

    // Print the realization plan and behavioral strategy
    #[structopt(long = "show-strategy")]
    show_strategy: bool,
}

fn run<T: History>(root: &T, player: Player, opt: &Opt) -> Result<(), Error> {
    let program = SequenceFormBuilder::new(player).make_program(root);
    println!(
        "Num sequences: {:?}, num leaves: {:?}",
        program.sequences().count(),
        program.num_leaves()
    );

    let solver_config = SolverConfig {
        validate_plan: !opt.no_validate,
        tolerance: opt.tolerance,
    };
    let solution = solve_program(&program, MinilpSolver::new(), &solver_config)?;
    println!("game value: {:?}", solution.game_value);

    if opt.show_strategy {
        let registry = program.registry();
        for (sequence_id, probability) in solution.realization_plan.iter() {
            println!("{} {}: {:.6}", sequence_id, registry.sequence(sequence_id), probability);
        }
        let behavioral = solution
            .realization_plan
            .behavioral(program.flows(), registry);
        for (infoset, probabilities) in behavioral.iter() {
            println!("infoset {}: {:?}", infoset, probabilities);
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let opt = Opt::from_args();

    let player = match Player::try_from(opt.player) {
        Ok(player) => player,
        Err(err) => {
            error!("{}", err);
            process::exit(2);
        }
    };
    info!("Solving {} for {}", opt.game, player);

    let result = match opt.game {
        GameKind::SimplePoker => run(&SimplePoker::new(), player, &opt),
        GameKind::Kuhn => run(&Kuhn::new(), player, &opt),
        GameKind::RockPaperScissors => run(&MatrixGame::rock_paper_scissors(), player, &opt),
        GameKind::MatchingPennies => run(&MatrixGame::matching_pennies(), player, &opt),
    };

    if let Err(err) = result {
        error!("{}", err);
        process::exit(1);
    }
}
