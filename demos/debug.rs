extern crate polyweave;

use log::LevelFilter;
use polyweave::*;

fn main() {

    env_logger::Builder::new()
        .filter_level(LevelFilter::Trace)
        .format_timestamp(None)
        .init();

    // triangle structure
    let subject_polygon = Polygon::from_coords(&[
        (5.0, 5.0),
        (10.0, 5.0),
        (10.0, 10.0),
    ]);

    // same as subject_polygon but offset by 2.0 in x
    let clip_polygon = Polygon::from_coords(&[
        (7.0, 5.0),
        (12.0, 5.0),
        (12.0, 10.0),
    ]);

    println!("intersection: {:?}", subject_polygon.intersection(&clip_polygon));
    println!("difference: {:?}", subject_polygon.difference(&clip_polygon));
}
