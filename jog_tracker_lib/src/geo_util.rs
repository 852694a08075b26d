use crate::location_sample::LocationSample;

pub fn haversine_distance(p1: (f64, f64), p2: (f64, f64)) -> f64 {
    const R: f64 = 6371.0; // Radius of the earth in km

    let d_lat = (p2.0 - p1.0).to_radians();
    let d_lon = (p2.1 - p1.1).to_radians();
    let lat1 = p1.0.to_radians();
    let lat2 = p2.0.to_radians();

    let a = f64::sin(d_lat / 2.).powi(2)
        + f64::cos(lat1) * f64::cos(lat2) * f64::sin(d_lon / 2.).powi(2);
    let c = 2. * f64::atan2(a.sqrt(), (1. - a).sqrt());

    R * c
}

/// Total trail length in kilometers, summed over consecutive sample pairs.
/// Recomputed from the history on every call, never cached.
pub fn total_distance_km(history: &[LocationSample]) -> f64 {
    if history.len() < 2 {
        return 0.;
    }

    history
        .windows(2)
        .map(|pair| {
            haversine_distance(
                (pair[0].latitude(), pair[0].longitude()),
                (pair[1].latitude(), pair[1].longitude()),
            )
        })
        .sum()
}
