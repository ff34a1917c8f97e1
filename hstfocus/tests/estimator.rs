use hstfocus::{
    Camera, CalendarInstant, FocusError, FocusEstimator, MeanFocusOptions, SplineOrder, TimeOfDay,
    calendar_to_mjd,
};
use hstfocus_mock::dynamic::{DynamicMockProvider, MockBehavior};

const CADENCE_DAYS: f64 = 5.0 / 1_440.0;

/// Linear signal in time, so both spline orders reproduce it exactly and
/// the continuous mean has a closed form.
fn line_value(mjd: f64) -> f64 {
    2.0 * (mjd - 55_000.0) + 0.5
}

/// Wire-format table with `line_value` rows at a five-minute cadence
/// between two instants inclusive. The date and time columns are filler;
/// only the Julian date and model columns carry information. Both are
/// rendered at full precision so closed-form expectations hold to tight
/// tolerances.
fn linear_table(from: &CalendarInstant, to: &CalendarInstant) -> String {
    let stop = calendar_to_mjd(to);
    let mut text = String::from("JulianDate   Month  Day  Year  Time      Model\n");
    let mut mjd = calendar_to_mjd(from);
    while mjd <= stop + 1e-9 {
        text.push_str(&format!(
            "{:.10}  1  1  2010  00:00:00  {:.10}\n",
            mjd + 2_400_000.5,
            line_value(mjd)
        ));
        mjd += CADENCE_DAYS;
    }
    text
}

#[tokio::test]
async fn same_day_span_issues_one_padded_fetch() {
    let (provider, controller) = DynamicMockProvider::new_with_controller();
    controller
        .set_default_behavior(MockBehavior::Table(linear_table(
            &CalendarInstant::new(2010, 6, 20, 11, 40, 0),
            &CalendarInstant::new(2010, 6, 20, 12, 50, 0),
        )))
        .await;

    let estimator = FocusEstimator::new(provider);
    let estimate = estimator
        .mean_focus(
            "2010-06-20 12:00:00",
            "2010-06-20 12:30:00",
            Camera::Uvis1,
            &MeanFocusOptions::new(),
        )
        .await
        .unwrap();

    let requests = controller.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!((requests[0].year, requests[0].month, requests[0].day), (2010, 6, 20));
    assert_eq!(requests[0].start, TimeOfDay { hour: 11, minute: 50 });
    assert_eq!(requests[0].stop, TimeOfDay { hour: 12, minute: 40 });

    // Mean of a line over [s, e] is its value at the midpoint.
    let s = calendar_to_mjd(&CalendarInstant::new(2010, 6, 20, 12, 0, 0));
    let e = calendar_to_mjd(&CalendarInstant::new(2010, 6, 20, 12, 30, 0));
    let expected = line_value((s + e) / 2.0);
    assert!((estimate.mean - expected).abs() < 1e-8, "{}", estimate.mean);
    assert!(estimate.variance.is_none());
}

#[tokio::test]
async fn midnight_crossing_span_fetches_each_date() {
    let (provider, controller) = DynamicMockProvider::new_with_controller();
    controller
        .push_behavior(MockBehavior::Table(linear_table(
            &CalendarInstant::new(2010, 6, 20, 23, 35, 0),
            &CalendarInstant::new(2010, 6, 20, 23, 55, 0),
        )))
        .await;
    controller
        .push_behavior(MockBehavior::Table(linear_table(
            &CalendarInstant::new(2010, 6, 21, 0, 0, 0),
            &CalendarInstant::new(2010, 6, 21, 0, 25, 0),
        )))
        .await;

    let estimator = FocusEstimator::new(provider);
    let estimate = estimator
        .mean_focus(
            "2010-06-20 23:50:00",
            "2010-06-21 00:10:00",
            Camera::Wfc1,
            &MeanFocusOptions::new(),
        )
        .await
        .unwrap();

    let requests = controller.requests().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].day, 20);
    assert_eq!(requests[0].start, TimeOfDay { hour: 23, minute: 40 });
    assert_eq!(requests[0].stop, TimeOfDay::END_OF_DAY);
    assert_eq!(requests[1].day, 21);
    assert_eq!(requests[1].start, TimeOfDay::START_OF_DAY);
    assert_eq!(requests[1].stop, TimeOfDay { hour: 0, minute: 20 });

    let midpoint = calendar_to_mjd(&CalendarInstant::new(2010, 6, 21, 0, 0, 0));
    assert!((estimate.mean - line_value(midpoint)).abs() < 1e-8);
}

#[tokio::test]
async fn missing_data_substitutes_the_configured_value() {
    let (provider, controller) = DynamicMockProvider::new_with_controller();
    controller
        .set_default_behavior(MockBehavior::Fail(FocusError::no_data("model output")))
        .await;

    let estimator = FocusEstimator::new(provider);
    let estimate = estimator
        .mean_focus(
            "2010-06-20 12:00:00",
            "2010-06-20 12:30:00",
            Camera::Uvis1,
            &MeanFocusOptions::new().not_found_value(-1.0).with_variance(true),
        )
        .await
        .unwrap();

    assert_eq!(estimate.mean, -1.0);
    assert_eq!(estimate.variance, Some(-1.0));
}

#[tokio::test]
async fn missing_data_without_a_substitute_propagates() {
    let (provider, controller) = DynamicMockProvider::new_with_controller();
    controller
        .set_default_behavior(MockBehavior::Fail(FocusError::no_data("model output")))
        .await;

    let estimator = FocusEstimator::new(provider);
    let err = estimator
        .mean_focus(
            "2010-06-20 12:00:00",
            "2010-06-20 12:30:00",
            Camera::Uvis1,
            &MeanFocusOptions::new(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, FocusError::NoData { .. }), "{err}");
}

#[tokio::test]
async fn transport_errors_are_never_substituted() {
    let (provider, controller) = DynamicMockProvider::new_with_controller();
    controller
        .set_default_behavior(MockBehavior::Fail(FocusError::provider(
            "stsci",
            "connection reset",
        )))
        .await;

    let estimator = FocusEstimator::new(provider);
    let err = estimator
        .mean_focus(
            "2010-06-20 12:00:00",
            "2010-06-20 12:30:00",
            Camera::Uvis1,
            &MeanFocusOptions::new().not_found_value(-1.0),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, FocusError::Provider { .. }), "{err}");
}

#[tokio::test]
async fn degenerate_span_is_the_instantaneous_value() {
    let (provider, controller) = DynamicMockProvider::new_with_controller();
    controller
        .set_default_behavior(MockBehavior::Table(linear_table(
            &CalendarInstant::new(2010, 6, 20, 11, 45, 0),
            &CalendarInstant::new(2010, 6, 20, 12, 15, 0),
        )))
        .await;

    let at = calendar_to_mjd(&CalendarInstant::new(2010, 6, 20, 12, 0, 0));
    let estimator = FocusEstimator::new(provider);
    let estimate = estimator
        .mean_focus(
            at,
            at,
            Camera::Uvis1,
            &MeanFocusOptions::new().with_variance(true),
        )
        .await
        .unwrap();

    assert!((estimate.mean - line_value(at)).abs() < 1e-8);
    assert_eq!(estimate.variance, Some(0.0));
}

#[tokio::test]
async fn linear_order_integrates_a_ramp_exactly() {
    // Three samples a day apart starting at MJD 0; the fetch walk pads into
    // the surrounding dates, so the same table answers every window.
    let table = "JulianDate  Month  Day  Year  Time  Model\n\
                 2400000.5  11  17  1858  00:00:00  1.0\n\
                 2400001.5  11  18  1858  00:00:00  3.0\n\
                 2400002.5  11  19  1858  00:00:00  5.0\n";
    let (provider, controller) = DynamicMockProvider::new_with_controller();
    controller
        .set_default_behavior(MockBehavior::Table(table.to_string()))
        .await;

    let estimator = FocusEstimator::new(provider);
    let estimate = estimator
        .mean_focus(
            0.0,
            2.0,
            Camera::Pc,
            &MeanFocusOptions::new().spline(SplineOrder::Linear),
        )
        .await
        .unwrap();

    assert_eq!(controller.requests().await.len(), 4);
    assert!((estimate.mean - 3.0).abs() < 1e-12, "{}", estimate.mean);
}

#[tokio::test]
async fn samples_short_of_the_span_are_a_data_error() {
    let (provider, controller) = DynamicMockProvider::new_with_controller();
    controller
        .set_default_behavior(MockBehavior::Table(linear_table(
            &CalendarInstant::new(2010, 6, 20, 12, 0, 0),
            &CalendarInstant::new(2010, 6, 20, 12, 10, 0),
        )))
        .await;

    let estimator = FocusEstimator::new(provider);
    let err = estimator
        .mean_focus(
            "2010-06-20 12:00:00",
            "2010-06-20 12:30:00",
            Camera::Uvis1,
            &MeanFocusOptions::new(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, FocusError::Data(_)), "{err}");
}

#[tokio::test]
async fn reversed_span_is_rejected() {
    let (provider, _controller) = DynamicMockProvider::new_with_controller();
    let estimator = FocusEstimator::new(provider);
    let err = estimator
        .mean_focus(55_369.0, 55_368.5, Camera::Uvis1, &MeanFocusOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, FocusError::InvalidArg(_)), "{err}");
}

#[tokio::test]
async fn malformed_calendar_strings_are_rejected() {
    let (provider, _controller) = DynamicMockProvider::new_with_controller();
    let estimator = FocusEstimator::new(provider);
    let err = estimator
        .mean_focus(
            "2010-06-20 12:00",
            "2010-06-20 12:30:00",
            Camera::Uvis1,
            &MeanFocusOptions::new(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, FocusError::InvalidArg(_)), "{err}");
}

#[tokio::test]
async fn continuous_variance_tracks_signal_spread() {
    // A steeper line over a longer window has nonzero spread; a constant
    // has (numerically) none.
    let (provider, controller) = DynamicMockProvider::new_with_controller();
    controller
        .set_default_behavior(MockBehavior::Table(linear_table(
            &CalendarInstant::new(2010, 6, 20, 11, 40, 0),
            &CalendarInstant::new(2010, 6, 20, 13, 20, 0),
        )))
        .await;

    let estimator = FocusEstimator::new(provider);
    let estimate = estimator
        .mean_focus(
            "2010-06-20 12:00:00",
            "2010-06-20 13:00:00",
            Camera::Uvis1,
            &MeanFocusOptions::new().with_variance(true),
        )
        .await
        .unwrap();

    // Var of a line a + b t over a span of length L is (b L)^2 / 12.
    let span = 1.0 / 24.0;
    let expected = (2.0 * span) * (2.0 * span) / 12.0;
    let variance = estimate.variance.unwrap();
    assert!((variance - expected).abs() < expected * 0.05, "{variance} vs {expected}");
    assert!(variance > 0.0);
}
