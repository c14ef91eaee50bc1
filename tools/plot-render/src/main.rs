// Copyright 2025. Scene renderer and image comparison CLI for aggplot.
//
// Usage:
//   plot-render render <scene> <width> <height> [-o <output>] [--bmp]
//   plot-render compare <file_a> <file_b>
//   plot-render list

use plot_render::{compare_files, scenes};
use std::path::Path;
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "render" => cmd_render(&args[2..]),
        "compare" => cmd_compare(&args[2..]),
        "list" => cmd_list(),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("plot-render: render aggplot scenes and compare images");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  render <scene> <width> <height> [-o <output>] [--bmp]");
    eprintln!("      Render a scene. The extension (.png or .bmp) is appended to <output>.");
    eprintln!();
    eprintln!("  compare <file_a> <file_b>");
    eprintln!("      Compare two PNG/BMP files pixel by pixel.");
    eprintln!();
    eprintln!("  list");
    eprintln!("      List available scene names.");
}

fn cmd_list() {
    println!("Available scenes:");
    for name in scenes::available_scenes() {
        println!("  {}", name);
    }
}

fn parse_dimension(arg: &str, what: &str) -> u32 {
    arg.parse().unwrap_or_else(|_| {
        eprintln!("Invalid {}: {}", what, arg);
        process::exit(1);
    })
}

fn cmd_render(args: &[String]) {
    if args.len() < 3 {
        eprintln!("Usage: plot-render render <scene> <width> <height> [-o <output>] [--bmp]");
        process::exit(1);
    }

    let scene = &args[0];
    let width = parse_dimension(&args[1], "width");
    let height = parse_dimension(&args[2], "height");

    let mut output: Option<String> = None;
    let mut bmp = false;
    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "-o" if i + 1 < args.len() => {
                output = Some(args[i + 1].clone());
                i += 2;
            }
            "--bmp" => {
                bmp = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown option: {}", other);
                i += 1;
            }
        }
    }
    let output = output.unwrap_or_else(|| format!("{}_{}x{}", scene, width, height));

    println!("Rendering '{}' at {}x{}...", scene, width, height);
    let canvas = match scenes::render_scene(scene, width, height) {
        Some(Ok(canvas)) => canvas,
        Some(Err(e)) => {
            eprintln!("Cannot create canvas: {}", e);
            process::exit(1);
        }
        None => {
            eprintln!("Unknown scene: '{}'. Use 'list' to see available scenes.", scene);
            process::exit(1);
        }
    };

    let saved = if bmp {
        canvas.save_bmp(&output)
    } else {
        canvas.save_png(&output)
    };
    match saved {
        Ok(path) => println!("Saved: {}", path.display()),
        Err(e) => {
            eprintln!("Export failed (code {}): {}", e.code(), e.message());
            process::exit(1);
        }
    }
}

fn cmd_compare(args: &[String]) {
    if args.len() < 2 {
        eprintln!("Usage: plot-render compare <file_a> <file_b>");
        process::exit(1);
    }

    let result = compare_files(Path::new(&args[0]), Path::new(&args[1])).unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    });
    println!("{}", result);

    if !result.identical {
        process::exit(1);
    }
}
