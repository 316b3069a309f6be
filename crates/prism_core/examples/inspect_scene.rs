//! Example: Parse and classify a scene file.
//!
//! Run with: cargo run --example inspect_scene -- scenes/basic.pov

use std::env;

use prism_core::{load_scene_file, Object};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_scene <path-to-scene-file>");
        println!("\nExamples:");
        println!("  cargo run --example inspect_scene -- scenes/basic.pov");
        println!("  cargo run --example inspect_scene -- scenes/floor.pov");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene_file(path) {
        Ok(classified) => {
            let scene = &classified.scene;
            println!("\n=== Scene ===");
            println!("Cameras: {}", scene.cameras.len());
            println!("Lights: {}", scene.lights.len());
            println!("Objects: {}", scene.objects.len());

            for directive in &scene.directives {
                println!("  line {}: {}", directive.line, directive.text);
            }

            println!("\n--- Objects ---");
            for (i, object) in scene.objects.iter().enumerate() {
                let pigment = object.pigment();
                let detail = match object {
                    Object::Sphere(s) => format!(
                        "center ({:.2}, {:.2}, {:.2}) radius {:.2}",
                        s.center().x,
                        s.center().y,
                        s.center().z,
                        s.radius()
                    ),
                    Object::Plane(p) => format!(
                        "normal ({:.2}, {:.2}, {:.2}) distance {:.2}",
                        p.normal().x,
                        p.normal().y,
                        p.normal().z,
                        p.distance()
                    ),
                    Object::Triangle(_) => "3 vertices".to_string(),
                };
                println!(
                    "  [{}] {} - {} - rgb ({:.2}, {:.2}, {:.2})",
                    i,
                    object.kind(),
                    detail,
                    pigment.r,
                    pigment.g,
                    pigment.b
                );
            }

            if !classified.warnings.is_empty() {
                println!("\n--- Warnings ---");
                for warning in &classified.warnings {
                    println!("  {}", warning);
                }
            }
        }
        Err(e) => {
            eprintln!("Error loading scene: {}", e);
            std::process::exit(1);
        }
    }
}
