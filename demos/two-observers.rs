use helioframes::{diagram, Frame, ObsTime, Observer, ObserverLocation, Representation, Transformer};
use uom::si::angle::{degree, second as arcsecond};
use uom::si::f64::{Angle, Length};
use uom::si::length::meter;

fn main() {
    let transformer = Transformer::default();
    let obstime = ObsTime::from_ymd_hms(2023, 10, 14, 17, 30, 0).expect("valid date");

    // a spacecraft in a solar orbit, trailing the Earth by 40°
    let spacecraft = Observer::from(
        ObserverLocation::new(
            Angle::new::<degree>(-40.),
            Angle::new::<degree>(3.5),
            Length::new::<meter>(1.2e11),
        )
        .expect("latitude is in [-90°, 90°] and the radius is positive"),
    );
    let earth = Observer::earth_at(&transformer, obstime).expect("ephemeris covers the date");
    println!("earth is at {earth}");
    println!("spacecraft is at {spacecraft}");

    // a few points along the central meridian as seen from the Earth
    let from_earth = Frame::helioprojective(obstime, earth.clone());
    for ty in [-900., -450., 0., 450., 900.] {
        let point = from_earth.realize(Representation::unit_spherical(
            Angle::new::<arcsecond>(0.),
            Angle::new::<arcsecond>(ty),
        ));
        let point = point
            .calculate_distance()
            .expect("the observer has a location");

        let from_spacecraft = transformer
            .transform(&point, &Frame::helioprojective(obstime, spacecraft.clone()))
            .expect("both observers have locations");
        let (tx2, ty2, _) = from_spacecraft.spherical();

        let stonyhurst = transformer
            .transform(&point, &Frame::stonyhurst(obstime))
            .expect("the observer has a location");
        let (lon, lat, _) = stonyhurst.spherical();

        println!(
            "earth (0\", {ty:6.0}\") -> stonyhurst ({:6.2}°, {:6.2}°) -> spacecraft ({:8.1}\", {:8.1}\")",
            lon.get::<degree>(),
            lat.get::<degree>(),
            tx2.get::<arcsecond>(),
            ty2.get::<arcsecond>(),
        );
    }

    // the frames involved, in graphviz form
    let diagram = diagram::pruned(
        transformer.graph(),
        &["heliographic_stonyhurst", "heliocentric", "helioprojective"],
    );
    println!("{}", diagram.to_dot());
}
