use helioframes::{sun, Frame, ObsTime, Observer, Representation, Transformer};
use uom::si::angle::{degree, second as arcsecond};
use uom::si::f64::Angle;

fn main() {
    let transformer = Transformer::default();
    let start = ObsTime::from_ymd_hms(2024, 5, 8, 0, 0, 0).expect("valid date");

    // `calculate_distance` needs to know where the observer actually is
    let earth = Observer::earth_at(&transformer, start).expect("ephemeris covers the date");

    // an active region observed on the disk, as seen from the Earth. it has no distance, so it's
    // placed on the solar surface.
    let seen = Frame::helioprojective(start, earth).realize(Representation::unit_spherical(
        Angle::new::<arcsecond>(-420.),
        Angle::new::<arcsecond>(-290.),
    ));
    let on_surface = seen
        .calculate_distance()
        .expect("the observer has a location");

    // the region is fixed to the rotating Sun, ie, in Carrington coordinates
    let carrington = transformer
        .transform(&on_surface, &Frame::carrington(start))
        .expect("the frame has an obstime");
    let (lon, lat, _) = carrington.spherical();
    println!(
        "region at Carrington lon={:.2}°, lat={:.2}°",
        lon.get::<degree>(),
        lat.get::<degree>()
    );

    // follow it across the disk until it rotates over the western limb
    for day in 0..10 {
        let obstime = start.offset_by_seconds(f64::from(day) * 86_400.);
        let l0 = sun::carrington_offset(&transformer, Some(&obstime)).expect("obstime is set");
        let b0 = sun::b0(&transformer, obstime).expect("ephemeris covers the date");

        // same Carrington position, later obstime
        let fixed = Frame::carrington(obstime).realize(*carrington.data());
        let stonyhurst = transformer
            .transform(&fixed, &Frame::stonyhurst(obstime))
            .expect("the frames share an obstime");
        let (hgs_lon, _, _) = stonyhurst.spherical();

        let view = transformer
            .transform(&fixed, &Frame::helioprojective(obstime, Observer::earth()))
            .expect("the earth can be located");
        let (tx, ty, _) = view.spherical();
        let side = if hgs_lon.get::<degree>().abs() < 90. {
            "visible"
        } else {
            "behind the limb"
        };
        println!(
            "{obstime}: L0={:7.2}° B0={:5.2}° stonyhurst lon={:7.2}° Tx={:8.1}\" Ty={:8.1}\" ({side})",
            l0.get::<degree>(),
            b0.get::<degree>(),
            hgs_lon.get::<degree>(),
            tx.get::<arcsecond>(),
            ty.get::<arcsecond>(),
        );
    }
}
