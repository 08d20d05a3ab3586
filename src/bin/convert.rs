use std::env;
use std::path::Path;

use graphcut::io::{load_grayscale_image, read_grid_csv, save_grayscale_image, write_grid_csv};

fn main() {
    env_logger::init();
    let operation = env::args().nth(1).and_then(|op| {
        if matches!(op.as_str(), "--image-to-csv" | "--csv-to-image") {
            Some(op)
        } else {
            None
        }
    });
    if env::args().len() != 4 || operation.is_none() {
        println!("Usage: convert --image-to-csv <image> <grid.csv>");
        println!("Usage: convert --csv-to-image <grid.csv> <image.png>");
        return;
    }

    let input = env::args().nth(2).unwrap();
    let output = env::args().nth(3).unwrap();
    let result = match operation.unwrap().as_str() {
        "--image-to-csv" => load_grayscale_image(Path::new(&input)).and_then(|grid| {
            println!("Imported {}x{} grid.", grid.rows(), grid.cols());
            write_grid_csv(&grid, Path::new(&output))
        }),
        "--csv-to-image" => read_grid_csv(Path::new(&input)).and_then(|grid| {
            println!("Imported {}x{} grid.", grid.rows(), grid.cols());
            save_grayscale_image(&grid, Path::new(&output))
        }),
        _ => unreachable!(),
    };
    match result {
        Ok(()) => println!("Export done."),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
