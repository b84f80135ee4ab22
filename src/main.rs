use std::io::{self, Write};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use addis_metro::catalog::Catalog;
use addis_metro::entities::booking::SearchDraft;
use addis_metro::events::{EventBus, UiEvent};
use addis_metro::map::MapView;
use addis_metro::store::{FileStore, Store};
use addis_metro::tickets::{self, ListQuery, StatusFilter};
use addis_metro::wizard::{self, Advance, Step, Wizard};
use addis_metro::{AppState, Config};

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "addis_metro=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    tracing::info!("Using store file {}", config.store_path.display());

    // Open the persistent store
    let store = FileStore::open(&config.store_path).expect("Failed to open store");
    let mut state = AppState { store, config };

    let catalog = Catalog::new();
    let mut bus = EventBus::new();
    bus.subscribe(|event: &UiEvent| match event {
        UiEvent::BookingConfirmed(id) => {
            println!("Booking successful! Your Booking ID: {id}");
        }
        UiEvent::TicketUsed(id) => println!("Ticket {id} marked as used"),
        UiEvent::StationSelected(_) | UiEvent::RouteSelected(_) => {}
    });

    println!("Addis Metro city bus booking");
    loop {
        println!();
        println!("1) Quick search  2) Book a trip  3) My tickets  4) Network map  5) Quit");
        match prompt("> ").as_str() {
            "1" => quick_search_page(&mut state.store, &bus),
            "2" => booking_page(&mut state.store, &bus, ""),
            "3" => tickets_page(&mut state.store, &bus),
            "4" => map_page(&mut state.store, &catalog, &bus),
            "5" | "q" => break,
            other => println!("Unknown choice: {other}"),
        }
    }
}

fn prompt(label: &str) -> String {
    print!("{label}");
    io::stdout().flush().ok();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return String::new();
    }
    line.trim().to_string()
}

fn prompt_prefilled(label: &str, current: &str) -> String {
    let answer = if current.is_empty() {
        prompt(&format!("{label}: "))
    } else {
        prompt(&format!("{label} [{current}]: "))
    };
    if answer.is_empty() {
        current.to_string()
    } else {
        answer
    }
}

fn quick_search_page(store: &mut dyn Store, bus: &EventBus<UiEvent>) {
    let draft = SearchDraft {
        from: prompt("From: "),
        to: prompt("To: "),
        date: prompt("Date (YYYY-MM-DD): "),
    };
    match wizard::quick_search(store, &draft) {
        Ok(()) => booking_page(store, bus, ""),
        Err(err) => println!("{err}"),
    }
}

fn booking_page(store: &mut dyn Store, bus: &EventBus<UiEvent>, query: &str) {
    let mut wizard = Wizard::start(store, query);

    loop {
        match wizard.step() {
            Step::RouteDate => {
                println!("\n-- Step 1: Route & Date --");
                wizard.form.from = prompt_prefilled("From", &wizard.form.from.clone());
                wizard.form.to = prompt_prefilled("To", &wizard.form.to.clone());
                wizard.form.date = prompt_prefilled("Travel date", &wizard.form.date.clone());
                wizard.form.time = prompt_prefilled("Travel time", &wizard.form.time.clone());
                let count = prompt_prefilled("Passengers", &wizard.form.passengers.to_string());
                match count.parse::<u32>() {
                    Ok(n) => wizard.set_passengers(n),
                    Err(_) => {
                        println!("Passengers must be a number");
                        continue;
                    }
                }
                if let Err(err) = wizard.next(store) {
                    println!("{err}");
                }
            }
            Step::Seats => {
                println!("\n-- Step 2: Seats --");
                render_seats(&wizard);
                match prompt("Seat number to toggle, n = next, p = back: ").as_str() {
                    "n" => {
                        if let Err(err) = wizard.next(store) {
                            println!("{err}");
                        }
                    }
                    "p" => wizard.prev(),
                    raw => match raw.parse::<u8>() {
                        Ok(number) => {
                            if let Err(err) = wizard.toggle_seat(number) {
                                println!("{err}");
                            }
                        }
                        Err(_) => println!("Unknown choice: {raw}"),
                    },
                }
            }
            Step::Passengers => {
                println!("\n-- Step 3: Passengers --");
                for i in 0..wizard.form.passenger_forms.len() {
                    println!("Passenger {}", i + 1);
                    let form = &wizard.form.passenger_forms[i];
                    let name = prompt_prefilled("  Full name", &form.name.clone());
                    let age = prompt_prefilled("  Age", &form.age.clone());
                    let form = &mut wizard.form.passenger_forms[i];
                    form.name = name;
                    form.age = age;
                }
                if prompt("n = next, p = back: ") == "p" {
                    wizard.prev();
                } else if let Err(err) = wizard.next(store) {
                    println!("{err}");
                }
            }
            Step::Review => {
                println!("\n-- Step 4: Review --");
                let summary = wizard.summary();
                println!("Route:      {}", summary.route);
                println!("Date:       {} at {}", summary.date, summary.time);
                println!("Passengers: {}", summary.passengers);
                println!("Seats:      {}", summary.seats);
                println!("Total:      ETB {}", summary.total);
                wizard.form.email = prompt_prefilled("Email", &wizard.form.email.clone());
                wizard.form.phone = prompt_prefilled("Phone", &wizard.form.phone.clone());
                wizard.form.payment = prompt_prefilled("Payment method", &wizard.form.payment.clone());
                match prompt("Confirm booking? (y/N/p): ").as_str() {
                    "y" => match wizard.next(store) {
                        Ok(Advance::Confirmed(id)) => {
                            bus.emit(&UiEvent::BookingConfirmed(id));
                        }
                        Ok(_) => {}
                        Err(err) => println!("{err}"),
                    },
                    "p" => wizard.prev(),
                    _ => return,
                }
            }
            Step::Confirmed => return,
        }
    }
}

fn render_seats(wizard: &Wizard) {
    println!(
        "Select exactly {} seat(s). [#] booked, (#) selected.",
        wizard.seat_map.cap()
    );
    for row in wizard.seat_map.seats().chunks(4) {
        let line: Vec<String> = row
            .iter()
            .map(|seat| {
                if seat.booked {
                    format!("[{:2}]", seat.number)
                } else if seat.selected {
                    format!("({:2})", seat.number)
                } else {
                    format!(" {:2} ", seat.number)
                }
            })
            .collect();
        println!("  {}", line.join(" "));
    }
    println!(
        "Selected: {} | Total: ETB {}",
        wizard
            .seat_map
            .selected_labels()
            .join(", "),
        wizard.seat_map.total_price()
    );
}

fn tickets_page(store: &mut dyn Store, bus: &EventBus<UiEvent>) {
    let mut query = ListQuery::default();

    loop {
        let stats = tickets::stats(store);
        println!(
            "\n-- My tickets ({} total, {} valid, {} used) --",
            stats.total, stats.valid, stats.used
        );

        let listed = tickets::list(store, &query);
        if listed.is_empty() {
            println!("No bookings found");
        }
        for booking in &listed {
            println!("{}\n", tickets::card_text(booking));
        }

        println!("filter all|valid|used, search <term>, view <id>, print <id>, use <id>, b = back");
        let line = prompt("> ");
        let (cmd, arg) = line.split_once(' ').unwrap_or((line.as_str(), ""));
        match (cmd, arg) {
            ("b", _) | ("back", _) => return,
            ("filter", "all") => query.filter = StatusFilter::All,
            ("filter", "valid") => query.filter = StatusFilter::Valid,
            ("filter", "used") => query.filter = StatusFilter::Used,
            ("search", "") => query.search = None,
            ("search", term) => query.search = Some(term.to_string()),
            ("view", id) => {
                if let Some(booking) = tickets::get(store, id) {
                    println!("{}", tickets::detail_text(&booking));
                }
            }
            ("print", id) => {
                if let Some(booking) = tickets::get(store, id) {
                    println!("{}", tickets::print_view(&booking));
                }
            }
            ("use", id) => {
                if prompt("Mark this ticket as used? This cannot be undone. (y/N): ") != "y" {
                    continue;
                }
                match tickets::mark_used(store, id) {
                    Ok(true) => bus.emit(&UiEvent::TicketUsed(id.to_string())),
                    Ok(false) => {}
                    Err(err) => println!("{err}"),
                }
            }
            _ => println!("Unknown choice: {line}"),
        }
    }
}

fn map_page(store: &mut dyn Store, catalog: &Catalog, bus: &EventBus<UiEvent>) {
    let mut view = MapView::new(catalog);

    loop {
        println!("\n-- Network map --");
        for marker in view.markers() {
            let mark = if marker.highlighted { "*" } else { " " };
            println!(
                " {mark} {} ({:.3}, {:.3})",
                marker.label, marker.position.0, marker.position.1
            );
        }
        if let Some(overlay) = view.overlays().first() {
            println!(
                "Showing route {}: {} stops, fit to ({:.3}, {:.3})-({:.3}, {:.3})",
                overlay.code,
                overlay.stops.len(),
                overlay.bounds.0.0,
                overlay.bounds.0.1,
                overlay.bounds.1.0,
                overlay.bounds.1.1,
            );
        }

        println!("station <id>, route <code>, routes, book <station>, bookroute <code>, reset, b = back");
        let line = prompt("> ");
        let (cmd, arg) = line.split_once(' ').unwrap_or((line.as_str(), ""));
        match (cmd, arg) {
            ("b", _) | ("back", _) => return,
            ("station", id) => {
                if let Some(info) = view.select_station(id, bus) {
                    println!("{} - {}", info.name, info.address);
                    for card in info.routes {
                        print_route_card(&card);
                    }
                }
            }
            ("route", code) => {
                if view.show_route(code, bus).is_none() {
                    println!("Unknown route: {code}");
                }
            }
            ("routes", _) => {
                for card in view.all_route_cards() {
                    print_route_card(&card);
                }
            }
            ("book", station) => {
                if let Some(query) = view.booking_query_from_station(station) {
                    booking_page(store, bus, &query);
                    return;
                }
            }
            ("bookroute", code) => {
                if let Some(query) = view.booking_query_for_route(code) {
                    booking_page(store, bus, &query);
                    return;
                }
            }
            ("reset", _) => view.reset(bus),
            _ => println!("Unknown choice: {line}"),
        }
    }
}

fn print_route_card(card: &addis_metro::map::RouteCard) {
    println!(
        "  {}: {} | {} | {} | {} | {:.1} km",
        card.name, card.stops, card.duration, card.fare, card.frequency, card.length_km
    );
}
