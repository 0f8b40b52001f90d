use blackjack_table::{
    can_hit, Deck, EngineError, Game, MatchSupervisor, MatchVerdict, Outcome, RoundPhase,
    TableConfig,
};
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "table-sim",
    about = "Play automated blackjack matches against the round engine"
)]
struct Args {
    /// Number of seats (clamped to 1-4)
    #[arg(long, default_value = "2")]
    players: usize,

    /// Starting chip balance per seat
    #[arg(long, default_value = "500")]
    chips: u32,

    /// Chip amount that wins the match
    #[arg(long, default_value = "1000")]
    goal: u32,

    /// Flat bet each seat places every round (capped by its wallet)
    #[arg(long, default_value = "50")]
    bet: u32,

    /// Stop after this many rounds even without a verdict
    #[arg(long, default_value = "1000")]
    rounds: u32,

    /// Seed the deck for a replayable match
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    let args = Args::parse();

    if args.goal <= args.chips {
        eprintln!("goal ({}) must exceed the starting chips ({})", args.goal, args.chips);
        std::process::exit(1);
    }
    if args.bet == 0 {
        eprintln!("bet must be positive");
        std::process::exit(1);
    }

    if let Err(err) = run(&args) {
        eprintln!("engine error: {err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), EngineError> {
    let config = TableConfig {
        player_count: args.players,
        starting_chips: args.chips,
        goal_amount: args.goal,
    };
    let mut game = match args.seed {
        Some(seed) => Game::with_deck(&config, Deck::seeded(seed)),
        None => Game::new(&config),
    };
    let supervisor = MatchSupervisor::new(config.goal_amount);

    for round in 1..=args.rounds {
        for seat in 0..game.player_count() {
            let player = game.player(seat);
            if player.bankrupt || player.chips == 0 {
                continue;
            }
            let stake = player.chips.min(args.bet);
            game.place_bet(seat, stake)?;
        }

        game.start_round()?;

        // every seat plays the dealer's own policy: hit below 17
        while game.phase == RoundPhase::PlayerTurns {
            let player = game.current_player();
            if game.current_hand().value() < 17 && can_hit(player, &game) {
                game.hit()?;
            } else {
                game.stand()?;
            }
        }
        if game.phase == RoundPhase::DealerResolution {
            game.resolve_dealer_hand()?;
        }
        game.settle_bets()?;

        print_round(round, &game);

        match supervisor.evaluate(&mut game) {
            MatchVerdict::Continue => game.reset_for_next_round(),
            MatchVerdict::AllBankrupt => {
                println!("round {round}: every seat is out of chips");
                return Ok(());
            }
            MatchVerdict::GoalReached { seats, chips } => {
                let seats: Vec<String> = seats.iter().map(|s| format!("#{s}")).collect();
                println!(
                    "round {round}: seat(s) {} reached the goal with {chips} chips",
                    seats.join(", ")
                );
                return Ok(());
            }
        }
    }

    println!("round cap reached without a verdict");
    Ok(())
}

fn print_round(round: u32, game: &Game) {
    let dealer = &game.dealer.hand;
    let dealer_cards: Vec<String> = dealer.cards.iter().map(|c| c.to_display()).collect();
    println!(
        "round {round}: dealer {} ({})",
        dealer.value(),
        dealer_cards.join(" ")
    );

    for player in &game.players {
        if player.bankrupt {
            println!("  seat #{}: bankrupt", player.id);
            continue;
        }
        let result = match player.outcome_main {
            Some(Outcome::Win) => "win",
            Some(Outcome::Push) => "push",
            Some(Outcome::Loss) => "loss",
            None => "sat out",
        };
        println!(
            "  seat #{}: {} at {} -> {} chips",
            player.id,
            result,
            player.hand.value(),
            player.chips
        );
    }
}
