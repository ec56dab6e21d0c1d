// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::process;

use clap::{value_t, App, Arg, ArgMatches};
use failure::ResultExt;
use image::RgbImage;
use log::{info, LevelFilter};
use seamcarve::{
    calculate_energy, energy_to_image, overlay_seam, CarveOptions, CarveOrder, PixelBuffer, Seam,
    SeamCarver, SeamPolicy,
};

fn target(matches: &ArgMatches, name: &str, current: u32) -> u32 {
    if matches.is_present(name) {
        value_t!(matches, name, u32).unwrap_or_else(|e| e.exit())
    } else {
        current
    }
}

fn run(matches: &ArgMatches) -> Result<(), failure::Error> {
    let input = matches.value_of("input").unwrap_or_default();
    let output = matches.value_of("output").unwrap_or_default();

    let source = image::open(input).with_context(|_| format!("cannot read {}", input))?;
    let image = PixelBuffer::from_image(&source)?;
    let (width, height) = image.dimensions();
    info!("loaded {} ({}x{})", input, width, height);

    if let Some(path) = matches.value_of("energy") {
        energy_to_image(&calculate_energy(&image))
            .save(path)
            .with_context(|_| format!("cannot write {}", path))?;
        info!("wrote energy map to {}", path);
    }

    let options = CarveOptions {
        order: match matches.value_of("order") {
            Some("height-first") => CarveOrder::HeightFirst,
            _ => CarveOrder::WidthFirst,
        },
        policy: if matches.is_present("strict") {
            SeamPolicy::Strict
        } else {
            SeamPolicy::Lenient
        },
    };
    let (newwidth, newheight) = (
        target(matches, "width", width),
        target(matches, "height", height),
    );

    let wants_preview = matches.is_present("preview");
    let mut preview: Option<RgbImage> = None;
    let mut first_seam = |image: &PixelBuffer, seam: &Seam| {
        if wants_preview && preview.is_none() {
            preview = Some(overlay_seam(image, seam));
        }
    };
    let carved = SeamCarver::with_options(image, newwidth, newheight, options)?
        .carve_observed(&mut first_seam)?;

    if let Some(path) = matches.value_of("preview") {
        let saved = match preview {
            Some(marked) => marked.save(path),
            None => carved.to_image().save(path),
        };
        saved.with_context(|_| format!("cannot write {}", path))?;
        info!("wrote seam preview to {}", path);
    }

    carved
        .to_image()
        .save(output)
        .with_context(|_| format!("cannot write {}", output))?;
    let (width, height) = carved.dimensions();
    info!("wrote {} ({}x{})", output, width, height);
    Ok(())
}

fn main() {
    let matches = App::new("seamcarve")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware image resizing by seam carving")
        .arg(
            Arg::with_name("input")
                .help("The image to carve")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the carved image")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("width")
                .short("W")
                .long("width")
                .value_name("PIXELS")
                .takes_value(true)
                .help("Target width (defaults to the current width)"),
        )
        .arg(
            Arg::with_name("height")
                .short("H")
                .long("height")
                .value_name("PIXELS")
                .takes_value(true)
                .help("Target height (defaults to the current height)"),
        )
        .arg(
            Arg::with_name("order")
                .long("order")
                .takes_value(true)
                .possible_values(&["width-first", "height-first"])
                .default_value("width-first")
                .help("Which axis to carve first"),
        )
        .arg(
            Arg::with_name("strict")
                .long("strict")
                .help("Fail on malformed seams instead of skipping the bad entries"),
        )
        .arg(
            Arg::with_name("energy")
                .long("energy")
                .value_name("PATH")
                .takes_value(true)
                .help("Also write the source image's energy map"),
        )
        .arg(
            Arg::with_name("preview")
                .long("preview")
                .value_name("PATH")
                .takes_value(true)
                .help("Also write the source image with its first seam marked in red"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("More logging; repeat for more"),
        )
        .get_matches();

    env_logger::Builder::new()
        .filter_level(match matches.occurrences_of("verbose") {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .parse_default_env()
        .init();

    if let Err(err) = run(&matches) {
        let message: Vec<String> = err.iter_chain().map(|cause| cause.to_string()).collect();
        eprintln!("seamcarve: {}", message.join(": "));
        process::exit(1);
    }
}
