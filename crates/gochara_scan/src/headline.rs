//! Headline post-processors.
//!
//! Pure functions applied by the caller over a finished event list.
//! Each rule matches one narrow (body, kind) pattern and produces a
//! short human headline; anything else passes through unmatched. The
//! scanner knows nothing about these.

use gochara_core::Body;
use gochara_zodiac::sign_from_longitude;

use crate::event::{EventDetail, TransitEvent};

/// A headline rule: returns a headline when the event matches.
pub type HeadlineRule = fn(&TransitEvent) -> Option<String>;

/// The stock rule set.
pub const DEFAULT_HEADLINE_RULES: &[HeadlineRule] = &[
    outer_station_headline,
    jupiter_ingress_headline,
    slow_pair_exact_headline,
];

const fn is_outer(body: Body) -> bool {
    matches!(
        body,
        Body::Jupiter | Body::Saturn | Body::Uranus | Body::Neptune | Body::Pluto
    )
}

/// Station of a slow outer planet: a turning point worth a headline.
pub fn outer_station_headline(event: &TransitEvent) -> Option<String> {
    let EventDetail::RetrogradeStation {
        body,
        direction,
        longitude_deg,
    } = &event.detail
    else {
        return None;
    };
    if !matches!(
        body,
        Body::Saturn | Body::Uranus | Body::Neptune | Body::Pluto
    ) {
        return None;
    }
    let sign = sign_from_longitude(*longitude_deg);
    Some(format!(
        "{} — {body} stations {} in {sign}",
        event.day.to_civil(),
        direction.name()
    ))
}

/// Jupiter changing signs: roughly a once-a-year event.
pub fn jupiter_ingress_headline(event: &TransitEvent) -> Option<String> {
    let EventDetail::SignIngress { body, to_sign, .. } = &event.detail else {
        return None;
    };
    if *body != Body::Jupiter {
        return None;
    }
    Some(format!(
        "{} — Jupiter enters {to_sign}",
        event.day.to_civil()
    ))
}

/// Exact aspect between two slow movers.
pub fn slow_pair_exact_headline(event: &TransitEvent) -> Option<String> {
    let EventDetail::AspectPeak {
        body_a,
        body_b,
        aspect,
        ..
    } = &event.detail
    else {
        return None;
    };
    if !is_outer(*body_a) || !is_outer(*body_b) {
        return None;
    }
    Some(format!(
        "{} — {body_a} {aspect} {body_b} is exact",
        event.day.to_civil()
    ))
}

/// Apply every rule to every event, collecting matches in event order.
pub fn headlines(events: &[TransitEvent], rules: &[HeadlineRule]) -> Vec<String> {
    events
        .iter()
        .flat_map(|event| rules.iter().filter_map(move |rule| rule(event)))
        .collect()
}
