use anyhow::{bail, Context};
use chrono::Local;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cinema_showtimes::config::AppConfig;
use cinema_showtimes::dates;
use cinema_showtimes::feeds::ALL_THEATERS;
use cinema_showtimes::{FinnkinoClient, MovieShowtimes, ScheduleQuery, Showtimes};

#[derive(Parser, Debug)]
#[command(version, about = "Cinema catalog and showtimes from the Finnkino feeds")]
struct Args {
    /// Theater area ID, or "all"
    #[arg(short, long, default_value = ALL_THEATERS)]
    theater: String,

    /// Day to show, as dd.mm.yyyy (defaults to today)
    #[arg(short, long)]
    date: Option<String>,

    /// Match against title, original title or genres, ignoring case
    #[arg(short, long, default_value = "")]
    search: String,

    /// Print the view model as JSON
    #[arg(long)]
    json: bool,

    /// List theater areas and exit
    #[arg(long)]
    list_theaters: bool,

    /// List selectable dates and exit
    #[arg(long)]
    list_dates: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.list_dates {
        for option in dates::current_date_options() {
            println!("{}  {}", option.value, option.label);
        }
        return Ok(());
    }

    let config = AppConfig::from_env();
    let client = FinnkinoClient::with_config(config.feeds)?;
    let showtimes = Showtimes::new(client);

    if args.list_theaters {
        let areas = showtimes
            .theater_areas()
            .await
            .context("Failed to load theater areas")?;
        println!("{:<6} All Locations", ALL_THEATERS);
        for area in areas.iter() {
            println!("{:<6} {}", area.id, area.name);
        }
        return Ok(());
    }

    let date = match args.date {
        Some(raw) => match dates::parse_feed_date(&raw) {
            Some(date) => dates::feed_date(date),
            None => bail!("Invalid date {raw:?}, expected dd.mm.yyyy"),
        },
        None => dates::feed_date(Local::now().date_naive()),
    };
    let query = ScheduleQuery::new(&args.theater, &date);

    info!("Loading showtimes for theater {} on {}", args.theater, date);
    let Some(view) = showtimes
        .view_model(&query, &args.search)
        .await
        .context("Failed to load showtimes")?
    else {
        bail!("Schedule request was superseded");
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if view.is_empty() {
        println!("No showtimes found");
        if args.search.trim().is_empty() {
            println!("Try selecting a different theater or date");
        } else {
            println!("Try a different search term or select a different theater or date");
        }
        return Ok(());
    }

    for (i, entry) in view.iter().enumerate() {
        print_entry(i + 1, entry);
    }
    info!("Listed {} movies", view.len());

    Ok(())
}

fn print_entry(position: usize, entry: &MovieShowtimes) {
    let movie = &entry.movie;
    println!("{}. {}", position, movie.title);
    if movie.shows_original_title() {
        println!("   ({})", movie.original_title);
    }

    let mut meta = Vec::new();
    if !movie.production_year.is_empty() {
        meta.push(movie.production_year.clone());
    }
    if !movie.length_in_minutes.is_empty() {
        meta.push(format!("{} min", movie.length_in_minutes));
    }
    if !movie.rating_label.is_empty() {
        meta.push(format!("rated {}", movie.rating_label));
    }
    if !meta.is_empty() {
        println!("   {}", meta.join(" | "));
    }

    let genres = movie.headline_genres();
    if !genres.is_empty() {
        println!("   Genres: {}", genres.join(", "));
    }
    let languages = entry.languages();
    if !languages.is_empty() {
        println!("   Languages: {}", languages.join(", "));
    }
    if !movie.synopsis.is_empty() {
        println!("   {}", movie.synopsis_teaser());
    }
    if let Some(trailer) = movie.trailer_embed_url() {
        println!("   Trailer: {}", trailer);
    }
    if let Some(venue) = entry.venue_label() {
        println!("   {}", venue);
    }

    // "*" marks slots that are not bookable yet
    let slots: Vec<String> = entry
        .shows
        .iter()
        .map(|show| {
            if show.is_bookable() {
                show.start_label()
            } else {
                format!("{}*", show.start_label())
            }
        })
        .collect();
    println!("   Showtimes: {}", slots.join("  "));
    println!();
}
