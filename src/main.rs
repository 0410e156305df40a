use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use flushrush::config::AppConfig;
use flushrush::database::{self, schema};
use flushrush::models::RestroomWithDistance;
use flushrush::services::geo_service::format_distance;
use flushrush::services::location_service::{resolve_location, EnvLocationProvider};
use flushrush::services::locator_state::{LocatorState, SortMode};
use flushrush::services::seed_service;
use flushrush::AppResult;

/// List the restrooms closest to you.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Only wheelchair accessible restrooms
    #[arg(long)]
    wheelchair: bool,
    /// Only gender neutral restrooms
    #[arg(long)]
    gender_neutral: bool,
    /// Skip restrooms behind a Wildcard scan
    #[arg(long)]
    wildcard_free: bool,
    /// Skip restrooms that are closed, being cleaned or blocked
    #[arg(long)]
    open_now: bool,
    /// Every requirement at once, nearest open match first
    #[arg(long)]
    quick: bool,
    /// Best rated first, distance breaks ties
    #[arg(long)]
    by_rating: bool,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli).await {
        eprintln!("flushrush: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> AppResult<()> {
    let config = AppConfig::from_env()?;

    let pool = database::connect(&config.database_url).await?;
    schema::ensure_schema(&pool).await?;
    if config.seed_on_empty {
        seed_service::seed_if_empty(&pool).await?;
    }

    let user_location = resolve_location(&EnvLocationProvider, config.fallback_location);
    let mut state = LocatorState::load(&pool, user_location).await?;
    apply_cli(&mut state, cli);

    match state.nearest() {
        Some(nearest) => println!(
            "Nearest match: {} ({}) · {} · {} min walk",
            nearest.restroom.building_name,
            nearest.restroom.floor,
            format_distance(nearest.distance),
            nearest.estimated_walk_time
        ),
        None => println!("No restroom matches these filters."),
    }

    let counts = state.status_counts();
    println!(
        "Status: {} open · {} cleaning · {} blocked · {} closed\n",
        counts.open, counts.cleaning, counts.blocked, counts.closed
    );

    for item in state.ranked().iter().take(config.nearby_limit) {
        println!("{}", render_row(item));
    }

    pool.close().await;
    Ok(())
}

fn apply_cli(state: &mut LocatorState, cli: &Cli) {
    if cli.quick {
        state.apply_quick_find();
    } else {
        state.filters.wheelchair_accessible = cli.wheelchair;
        state.filters.gender_neutral = cli.gender_neutral;
        state.filters.wildcard_free = cli.wildcard_free;
        state.open_now = cli.open_now;
    }
    if cli.by_rating {
        state.set_sort_mode(SortMode::Rating);
    }
}

fn render_row(item: &RestroomWithDistance) -> String {
    let restroom = &item.restroom;
    let mut tags = Vec::new();
    if restroom.is_wheelchair_accessible {
        tags.push("♿");
    }
    if restroom.is_gender_neutral {
        tags.push("⚧");
    }
    if !restroom.requires_wildcard {
        tags.push("no card");
    }

    format!(
        "{:>7}  {:>3} min  {:<32} {:<14} {:<20} {}",
        format_distance(item.distance),
        item.estimated_walk_time,
        restroom.building_name,
        restroom.floor,
        restroom.status.label(),
        tags.join(" ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use flushrush::models::Location;

    fn state() -> LocatorState {
        LocatorState::new(Location::new(42.0551, -87.675))
    }

    #[test]
    fn flags_map_onto_state() {
        let cli = Cli::try_parse_from(["flushrush", "--wheelchair", "--open-now", "--by-rating"]).unwrap();
        let mut state = state();
        apply_cli(&mut state, &cli);

        assert!(state.filters.wheelchair_accessible);
        assert!(!state.filters.gender_neutral);
        assert!(!state.filters.wildcard_free);
        assert!(state.open_now);
        assert_eq!(state.sort_mode, SortMode::Rating);
    }

    #[test]
    fn quick_turns_on_open_now() {
        let cli = Cli::try_parse_from(["flushrush", "--quick"]).unwrap();
        let mut state = state();
        apply_cli(&mut state, &cli);

        assert!(state.open_now);
        assert!(state.filters.wheelchair_accessible);
        assert!(state.filters.gender_neutral);
        assert!(state.filters.wildcard_free);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["flushrush", "--teleport"]).is_err());
    }
}
