// monitoring/plotting.rs
//
// PNG charts of the membership functions and of a single inference. Pure
// consumers of the engine; nothing drawn here feeds back into control.

use crate::control_system::TrafficLightController;
use crate::fuzzy::{InferenceEngine, LinguisticVariable};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

const TERM_COLORS: [RGBColor; 3] = [BLUE, GREEN, RED];
const AGGREGATE_COLOR: RGBColor = RGBColor(255, 165, 0);

/// Optional extras drawn over a variable's membership curves.
#[derive(Default)]
struct Overlay<'a> {
    marker: Option<(f64, String)>,
    aggregated: Option<&'a [f64]>,
}

fn capitalize(term: &str) -> String {
    let mut chars = term.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// e.g. `Density Fuzzification (Low: 1.00, Medium: 0.00, High: 0.00)`.
pub fn fuzzification_caption(label: &str, variable: &LinguisticVariable, degrees: &[f64]) -> String {
    let parts: Vec<String> = variable
        .terms()
        .zip(degrees)
        .map(|((name, _), degree)| format!("{}: {:.2}", capitalize(name), degree))
        .collect();
    format!("{} Fuzzification ({})", label, parts.join(", "))
}

fn draw_variable(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    variable: &LinguisticVariable,
    title: &str,
    x_desc: &str,
    overlay: Overlay<'_>,
) -> Result<(), Box<dyn Error>> {
    let universe = variable.universe();
    let xs = universe.points();

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(universe.start()..universe.end(), 0.0..1.05)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc("Membership")
        .draw()?;

    if let Some(aggregated) = overlay.aggregated {
        chart
            .draw_series(AreaSeries::new(
                xs.iter().copied().zip(aggregated.iter().copied()),
                0.0,
                AGGREGATE_COLOR.mix(0.3),
            ))?
            .label("Aggregated Output")
            .legend(|(x, y)| {
                Rectangle::new([(x, y - 5), (x + 20, y + 5)], AGGREGATE_COLOR.mix(0.3).filled())
            });
    }

    for (index, (name, _)) in variable.terms().enumerate() {
        let color = TERM_COLORS[index % TERM_COLORS.len()];
        chart
            .draw_series(LineSeries::new(
                xs.iter().copied().zip(variable.sample(index)),
                color.stroke_width(2),
            ))?
            .label(capitalize(name))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    if let Some((x, label)) = overlay.marker {
        chart
            .draw_series(LineSeries::new(vec![(x, 0.0), (x, 1.05)], BLACK.stroke_width(2)))?
            .label(label)
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

/// Density, wait and green membership curves stacked in one image.
pub fn plot_membership_functions(
    engine: &InferenceEngine,
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path.as_ref(), (1000, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((3, 1));

    draw_variable(
        &areas[0],
        engine.density(),
        "Traffic Density Membership Functions",
        "Density (%)",
        Overlay::default(),
    )?;
    draw_variable(
        &areas[1],
        engine.wait(),
        "Wait Time Membership Functions",
        "Wait Time (seconds)",
        Overlay::default(),
    )?;
    draw_variable(
        &areas[2],
        engine.green(),
        "Green Light Duration Membership Functions",
        "Green Time (seconds)",
        Overlay::default(),
    )?;

    root.present()?;
    Ok(())
}

/// Inputs marked on their variables, plus the aggregated output and the
/// controller's final green time.
pub fn plot_inference(
    controller: &TrafficLightController,
    density: f64,
    wait: f64,
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn Error>> {
    let engine = controller.engine();
    let density = engine.density().universe().clamp(density);
    let wait = engine.wait().universe().clamp(wait);
    let green = controller.compute_green_time(density, wait).seconds();
    let trace = engine.infer_detailed(density, wait)?;

    let root = BitMapBackend::new(path.as_ref(), (1200, 1400)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((3, 1));

    draw_variable(
        &areas[0],
        engine.density(),
        &fuzzification_caption("Density", engine.density(), &trace.density_degrees),
        "Density (%)",
        Overlay {
            marker: Some((density, format!("Input: {:.1}%", density))),
            aggregated: None,
        },
    )?;
    draw_variable(
        &areas[1],
        engine.wait(),
        &fuzzification_caption("Wait Time", engine.wait(), &trace.wait_degrees),
        "Wait Time (seconds)",
        Overlay {
            marker: Some((wait, format!("Input: {:.1}s", wait))),
            aggregated: None,
        },
    )?;
    draw_variable(
        &areas[2],
        engine.green(),
        &format!("Defuzzification -> Green Time: {:.1} seconds", green),
        "Green Time (seconds)",
        Overlay {
            marker: Some((green, format!("Output: {:.1}s", green))),
            aggregated: Some(&trace.aggregated),
        },
    )?;

    root.present()?;
    Ok(())
}
