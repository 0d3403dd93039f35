extern crate clap;
extern crate env_logger;
extern crate failure;
#[macro_use]
extern crate log;
extern crate mandelpool;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use num::Complex;
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::sync::Arc;

use mandelpool::output::write_pnm;
use mandelpool::render::{DEFAULT_CHUNK, DEFAULT_LIMIT};
use mandelpool::stats::{time, Summary};
use mandelpool::{Escape, Kernel, Palette, PlaneMapper, Rejecting, Renderer, Strategy};

// "1.5,-2" style pairs; both halves must parse.
fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    let index = s.find(separator)?;
    let left = s[..index].parse().ok()?;
    let right = s[index + 1..].parse().ok()?;
    Some((left, right))
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    parse_pair(s, ',').map(|(re, im)| Complex { re, im })
}

fn validate_pair<T: FromStr>(s: &str, separator: char, what: &str) -> Result<(), String> {
    parse_pair::<T>(s, separator)
        .map(|_| ())
        .ok_or_else(|| format!("Could not parse {} from '{}'", what, s))
}

fn validate_count<T>(s: &str, range: RangeInclusive<T>, what: &str) -> Result<(), String>
where
    T: FromStr + PartialOrd + Display,
{
    let n: T = s.parse().map_err(|_| format!("Could not parse {} from '{}'", what, s))?;
    if range.contains(&n) {
        Ok(())
    } else {
        Err(format!("{} must be between {} and {}", capitalize(what), range.start(), range.end()))
    }
}

fn validate_positive(s: &str, what: &str) -> Result<(), String> {
    match s.parse::<usize>() {
        Ok(0) => Err(format!("{} must be at least 1", capitalize(what))),
        Ok(_) => Ok(()),
        Err(_) => Err(format!("Could not parse {} from '{}'", what, s)),
    }
}

fn capitalize(what: &str) -> String {
    let mut chars = what.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const STRATEGY: &str = "strategy";
const THREADS: &str = "threads";
const CHUNK: &str = "chunk";
const ITERATIONS: &str = "iterations";
const RUNS: &str = "runs";
const PLAIN: &str = "plain";
const GRAY: &str = "gray";
const ASCII: &str = "ascii";

fn args<'a>(default_threads: &'a str, default_chunk: &'a str, default_limit: &'a str) -> ArgMatches<'a> {
    App::new("mandel")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Mandelbrot renderer; compares ways of dividing the work among threads")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file (PPM)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| validate_pair::<u16>(&s, 'x', "output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .required(false)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2.103,-1.238")
                .validator(|s| validate_pair::<f64>(&s, ',', "left lower corner"))
                .help("Left lower corner of the mandelbrot space"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .required(false)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1.201,1.240")
                .validator(|s| validate_pair::<f64>(&s, ',', "right upper corner"))
                .help("Right upper corner of the mandelbrot space"),
        )
        .arg(
            Arg::with_name(STRATEGY)
                .required(false)
                .long(STRATEGY)
                .short("S")
                .takes_value(true)
                .possible_values(Strategy::NAMES)
                .default_value("pool-chunk")
                .help("How to divide the image among threads"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value(default_threads)
                .validator(|s| validate_count(&s, 1..=4096, "thread count"))
                .help("Number of worker threads for the counter and pool strategies"),
        )
        .arg(
            Arg::with_name(CHUNK)
                .required(false)
                .long(CHUNK)
                .short("c")
                .takes_value(true)
                .default_value(default_chunk)
                .validator(|s| validate_positive(&s, "chunk size"))
                .help("Cells per job for the pool-chunk strategy"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value(default_limit)
                .validator(|s| validate_count(&s, 1..=200_000, "iteration count"))
                .help("Iteration cap per point"),
        )
        .arg(
            Arg::with_name(RUNS)
                .required(false)
                .long(RUNS)
                .short("n")
                .takes_value(true)
                .default_value("1")
                .validator(|s| validate_count(&s, 1..=1000, "run count"))
                .help("Number of times to render, for timing"),
        )
        .arg(
            Arg::with_name(PLAIN)
                .long(PLAIN)
                .help("Iterate every point instead of skipping the cardioid and bulb"),
        )
        .arg(Arg::with_name(GRAY).long(GRAY).help("Render in grayscale"))
        .arg(Arg::with_name(ASCII).long(ASCII).help("Write a plain-text (P3) pixmap"))
        .get_matches()
}

// Validators have already vetted every value this touches.
fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, failure::Error> {
    let raw = matches.value_of(name).unwrap_or_default();
    T::from_str(raw).map_err(|_| failure::err_msg(format!("could not parse --{} {:?}", name, raw)))
}

fn run(matches: &ArgMatches) -> Result<(), failure::Error> {
    let (width, height): (usize, usize) = parse_pair(matches.value_of(SIZE).unwrap_or_default(), 'x')
        .ok_or_else(|| failure::err_msg("could not parse image size"))?;
    let leftlower = parse_complex(matches.value_of(LEFTLOWER).unwrap_or_default())
        .ok_or_else(|| failure::err_msg("could not parse left lower corner"))?;
    let rightupper = parse_complex(matches.value_of(RIGHTUPPER).unwrap_or_default())
        .ok_or_else(|| failure::err_msg("could not parse right upper corner"))?;
    let threads: usize = value(matches, THREADS)?;
    let chunk: usize = value(matches, CHUNK)?;
    let limit: u32 = value(matches, ITERATIONS)?;
    let runs: usize = value(matches, RUNS)?;

    let name = matches.value_of(STRATEGY).unwrap_or_default();
    let strategy = Strategy::parse(name, threads, chunk)
        .ok_or_else(|| failure::err_msg(format!("unknown strategy {}", name)))?;

    let kernel: Arc<dyn Kernel> = if matches.is_present(PLAIN) {
        Arc::new(Escape { limit })
    } else {
        Arc::new(Rejecting { limit })
    };
    let palette = if matches.is_present(GRAY) {
        Palette::Gray
    } else {
        Palette::Smooth
    };
    let renderer = Renderer::new(
        PlaneMapper::new(width, height, leftlower, rightupper)?,
        kernel,
        palette,
    );

    let mut samples = Vec::with_capacity(runs);
    let mut last = None;
    for n in 0..runs {
        let (grid, elapsed) = time(|| renderer.generate(strategy));
        info!("run {}: {} in {:?}", n + 1, strategy, elapsed);
        samples.push(elapsed);
        last = Some(grid?);
    }

    if let Some(summary) = Summary::from_samples(&samples) {
        println!("{}x{} {}: {}", width, height, strategy, summary);
    }
    if let Some(grid) = last {
        write_pnm(
            matches.value_of(OUTPUT).unwrap_or_default(),
            &grid,
            matches.is_present(ASCII),
        )?;
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let default_threads = num_cpus::get().to_string();
    let default_chunk = DEFAULT_CHUNK.to_string();
    let default_limit = DEFAULT_LIMIT.to_string();
    let matches = args(&default_threads, &default_chunk, &default_limit);
    if let Err(e) = run(&matches) {
        eprintln!("mandel: {}", e);
        std::process::exit(1);
    }
}
