//! Plain-text board rendering for `--once`.

use std::fmt::Write;

use commute_core::display::Rounded;
use commute_core::{format_eta, weather_label, DashboardSnapshot, EtaState, RawArrival};

/// Width of the destination column.
const NAME_WIDTH: usize = 28;

/// Render a snapshot as a terminal board.
pub fn render_board(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();

    let marker = if snapshot.status.is_good_service() {
        ""
    } else {
        " (!)"
    };
    let _ = writeln!(out, "Line status: {}{}", snapshot.status, marker);

    render_section(&mut out, "Trains", &snapshot.trains.inbound, &snapshot.trains.outbound);
    render_section(&mut out, "Buses", &snapshot.buses.inbound, &snapshot.buses.outbound);

    let weather = &snapshot.weather;
    let _ = writeln!(out, "\nWeather");
    let _ = writeln!(
        out,
        "  {}  {}°C (feels {}°C)  wind {} km/h  rain {}%",
        weather_label(weather.code),
        Rounded(weather.temp),
        Rounded(weather.feels_like),
        Rounded(weather.wind),
        Rounded(weather.precip_prob.map(f64::from)),
    );

    out
}

fn render_section(out: &mut String, title: &str, inbound: &[RawArrival], outbound: &[RawArrival]) {
    let _ = writeln!(out, "\n{title}");
    for (label, arrivals) in [("Inbound", inbound), ("Outbound", outbound)] {
        let _ = writeln!(out, "  {label}");
        if arrivals.is_empty() {
            let _ = writeln!(out, "    No arrivals");
            continue;
        }
        for arrival in arrivals {
            let name = format!("{} {}", arrival.line_id, arrival.destination_name);
            let urgent = if EtaState::from_seconds(arrival.time_to_station).is_urgent() {
                " *"
            } else {
                ""
            };
            let _ = writeln!(
                out,
                "    {name:<NAME_WIDTH$} {}{urgent}",
                format_eta(arrival.time_to_station)
            );
        }
    }
}
