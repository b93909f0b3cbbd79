use legendgram::palette::DEFAULT_BAR_COLOR;
use legendgram::stats::{default_breaks, linspace, percentiles};
use legendgram::{
    AxesId, Colormap, DiscretePalette, Figure, LegendgramError, LegendgramOptions, Location,
    Palette, Rect, legendgram, make_location,
};
use plotters::style::RGBColor;

const MAP: Rect = Rect::new(0.1, 0.1, 0.8, 0.8);

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn one_to(n: u32) -> Vec<f64> {
    (1..=n).map(f64::from).collect()
}

fn setup() -> (Figure, AxesId) {
    init_logs();
    let mut fig = Figure::new(800, 600);
    let map = fig.add_axes(MAP);
    (fig, map)
}

fn bar_colors(fig: &Figure, id: AxesId) -> Vec<RGBColor> {
    fig.axes(id)
        .unwrap()
        .histogram()
        .expect("legendgram draws a histogram")
        .bars
        .iter()
        .map(|b| b.facecolor)
        .collect()
}

/// Distinct colors in order of first appearance; also checks each color forms one contiguous run.
fn color_runs(colors: &[RGBColor]) -> Vec<RGBColor> {
    let mut runs: Vec<RGBColor> = Vec::new();
    for c in colors {
        if runs.last() != Some(c) {
            assert!(!runs.contains(c), "color {c:?} appears in two separate runs");
            runs.push(*c);
        }
    }
    runs
}

#[test]
fn quartile_breaks_give_four_aligned_bands() {
    let (mut fig, map) = setup();
    let y = one_to(100);
    let pal = Palette::by_name("Blues_4").unwrap();
    let id = legendgram(
        &mut fig,
        map,
        &y,
        Some(&[25.0, 50.0, 75.0, 100.0]),
        Some(&pal),
        &LegendgramOptions::default(),
    )
    .unwrap();

    let colors = bar_colors(&fig, id);
    assert_eq!(colors.len(), 50);
    let runs = color_runs(&colors);
    assert_eq!(runs.len(), 4);
    for (c, color) in runs.iter().enumerate() {
        assert_eq!(*color, pal.class_color(c, 4));
    }

    // Each band starts at the first bar whose left edge reaches past the previous break.
    let hist = fig.axes(id).unwrap().histogram().unwrap();
    for (start, brk) in [(13usize, 25.0), (25, 50.0), (38, 75.0)] {
        assert_ne!(colors[start - 1], colors[start]);
        assert!(hist.bars[start - 1].left < brk);
        assert!(hist.bars[start].left >= brk);
    }
}

#[test]
fn default_breaks_make_ten_viridis_classes() {
    let (mut fig, map) = setup();
    let y = one_to(1000);
    let id = legendgram(&mut fig, map, &y, None, None, &LegendgramOptions::default()).unwrap();

    let runs = color_runs(&bar_colors(&fig, id));
    assert_eq!(runs.len(), 10);
    let viridis = Palette::Discrete(DiscretePalette::viridis_10());
    for (c, color) in runs.iter().enumerate() {
        assert_eq!(*color, viridis.class_color(c, 10));
    }

    let breaks = default_breaks(&y).unwrap();
    assert_eq!(breaks.len(), 10);
    assert_eq!(breaks, percentiles(&y, &linspace(1.0, 99.0, 10)).unwrap());
}

#[test]
fn continuous_palette_skips_class_count_check() {
    let (mut fig, map) = setup();
    let y = one_to(100);
    let pal = Palette::Continuous(Colormap::by_name("magma").unwrap());
    let breaks = [10.0, 20.0, 40.0, 60.0, 80.0, 90.0, 100.0];
    let id = legendgram(&mut fig, map, &y, Some(&breaks), Some(&pal), &LegendgramOptions::default())
        .unwrap();
    assert_eq!(color_runs(&bar_colors(&fig, id)).len(), 7);
}

#[test]
fn mismatched_discrete_palette_fails_and_leaves_figure_alone() {
    let (mut fig, map) = setup();
    let y = one_to(200);
    let pal = Palette::by_name("Blues_5").unwrap();
    let err = legendgram(&mut fig, map, &y, None, Some(&pal), &LegendgramOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        LegendgramError::ClassCountMismatch {
            breaks: 10,
            colors: 5
        }
    ));
    assert_eq!(fig.len(), 1);
}

#[test]
fn breaks_without_palette_are_unrecognized() {
    let (mut fig, map) = setup();
    let err = legendgram(
        &mut fig,
        map,
        &one_to(10),
        Some(&[5.0, 10.0]),
        None,
        &LegendgramOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, LegendgramError::UnrecognizedPalette(_)));
    assert_eq!(fig.len(), 1);
}

#[test]
fn clip_sets_exact_x_limits() {
    let (mut fig, map) = setup();
    let opts = LegendgramOptions {
        clip: Some((10.0, 60.0)),
        ..LegendgramOptions::default()
    };
    let id = legendgram(&mut fig, map, &one_to(100), None, None, &opts).unwrap();
    assert_eq!(fig.axes(id).unwrap().xlim(), (10.0, 60.0));
}

#[test]
fn reversed_or_empty_clip_is_rejected_before_adding_axes() {
    let (mut fig, map) = setup();
    for clip in [(80.0, 20.0), (5.0, 5.0), (f64::NAN, 10.0), (0.0, f64::INFINITY)] {
        let opts = LegendgramOptions {
            clip: Some(clip),
            ..LegendgramOptions::default()
        };
        assert!(matches!(
            legendgram(&mut fig, map, &one_to(100), None, None, &opts),
            Err(LegendgramError::InvalidClip(_, _))
        ));
    }
    assert_eq!(fig.len(), 1);
}

#[test]
fn inset_is_placed_and_styled() {
    let (mut fig, map) = setup();
    let opts = LegendgramOptions {
        loc: Location::UpperRight,
        legend_size: (0.4, 0.3),
        frameon: true,
        ..LegendgramOptions::default()
    };
    let id = legendgram(&mut fig, map, &one_to(50), None, None, &opts).unwrap();
    assert_eq!(fig.len(), 2);

    let ax = fig.axes(id).unwrap();
    let expected = make_location(MAP, Location::UpperRight, (0.4, 0.3)).unwrap();
    assert_eq!(ax.position(), expected);
    assert!(ax.frame_on());
    assert!(!ax.y_axis_visible());
    assert_eq!(ax.tick_params().labelsize, Some(12));
}

#[test]
fn frame_is_off_and_custom_label_size_kept_by_default() {
    let (mut fig, map) = setup();
    let mut opts = LegendgramOptions::default();
    opts.tick_params.labelsize = Some(8);
    let id = legendgram(&mut fig, map, &one_to(50), None, None, &opts).unwrap();
    let ax = fig.axes(id).unwrap();
    assert!(!ax.frame_on());
    assert_eq!(ax.tick_params().labelsize, Some(8));
}

#[test]
fn bars_past_last_break_keep_bar_color() {
    let (mut fig, map) = setup();
    let pal = Palette::by_name("reds").unwrap();
    let id = legendgram(
        &mut fig,
        map,
        &one_to(100),
        Some(&[25.0, 50.0]),
        Some(&pal),
        &LegendgramOptions::default(),
    )
    .unwrap();
    let colors = bar_colors(&fig, id);
    assert!(colors[25..].iter().all(|c| *c == DEFAULT_BAR_COLOR));
    assert!(colors[..25].iter().all(|c| *c != DEFAULT_BAR_COLOR));
}

#[test]
fn break_beyond_data_range_is_clamped() {
    let (mut fig, map) = setup();
    let pal = Palette::by_name("Greens_3").unwrap();
    let id = legendgram(
        &mut fig,
        map,
        &one_to(100),
        Some(&[30.0, 60.0, 500.0]),
        Some(&pal),
        &LegendgramOptions::default(),
    )
    .unwrap();
    let colors = bar_colors(&fig, id);
    let runs = color_runs(&colors);
    assert_eq!(
        runs,
        vec![
            pal.class_color(0, 3),
            pal.class_color(1, 3),
            pal.class_color(2, 3)
        ]
    );
    assert_eq!(*colors.last().unwrap(), pal.class_color(2, 3));
}

#[test]
fn bad_samples_and_parents_are_reported() {
    let (mut fig, map) = setup();
    let opts = LegendgramOptions::default();
    assert!(matches!(
        legendgram(&mut fig, map, &[], None, None, &opts),
        Err(LegendgramError::EmptySample)
    ));
    assert!(matches!(
        legendgram(&mut fig, map, &[1.0, f64::INFINITY], None, None, &opts),
        Err(LegendgramError::NonFiniteSample(_))
    ));

    let foreign = {
        let mut other = Figure::new(10, 10);
        other.add_axes(MAP);
        other.add_axes(MAP)
    };
    assert!(matches!(
        legendgram(&mut fig, foreign, &one_to(10), None, None, &opts),
        Err(LegendgramError::UnknownAxes(_))
    ));

    let best = LegendgramOptions {
        loc: Location::Best,
        ..LegendgramOptions::default()
    };
    assert!(matches!(
        legendgram(&mut fig, map, &one_to(10), None, None, &best),
        Err(LegendgramError::InvalidLocation(_))
    ));
    assert_eq!(fig.len(), 1);
}
