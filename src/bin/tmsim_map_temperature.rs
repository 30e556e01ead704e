use gemlab::mesh::Mesh;
use std::fs::File;
use std::path::PathBuf;
use structopt::StructOpt;
use tmsim::base::Error;
use tmsim::fields::FvMesh;
use tmsim::thermal::ThermalCase;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "tmsim_map_temperature",
    about = "Maps the temperature of a thermal case onto a solid mesh"
)]
struct Options {
    /// Directory of the thermal case
    #[structopt(parse(from_os_str))]
    case_dir: PathBuf,

    /// JSON file with the solid mesh
    #[structopt(parse(from_os_str))]
    solid_mesh: PathBuf,

    /// Simulation time
    time: f64,

    /// Name of the temperature field
    #[structopt(short, long, default_value = "T")]
    field: String,

    /// Writes the mapped field to this JSON file
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let options = Options::from_args();
    if let Err(e) = run(&options) {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run(options: &Options) -> Result<(), Error> {
    // load the solid mesh
    let mesh = Mesh::read_json(&options.solid_mesh)
        .map_err(|e| Error::config(format!("cannot read {:?}: {}", options.solid_mesh, e)))?;
    let solid =
        FvMesh::new(mesh).map_err(|e| Error::config(format!("invalid mesh in {:?}: {}", options.solid_mesh, e)))?;

    // read and map the field
    let case = ThermalCase::open(&options.case_dir)?;
    let (field, found_time) = case
        .read_scalar(&options.field, options.time)?
        .ok_or_else(|| Error::MissingField {
            name: options.field.clone(),
            time: options.time,
        })?;
    let mapped = case.map_to(&field, found_time, options.time, &solid)?;

    // message
    let min = mapped.values.iter().fold(f64::INFINITY, |acc, v| acc.min(*v));
    let max = mapped.values.iter().fold(f64::NEG_INFINITY, |acc, v| acc.max(*v));
    let mean = mapped.values.iter().sum::<f64>() / (mapped.values.len() as f64);
    println!("field        = {}", mapped.name);
    println!("time         = {:?} (recorded {:?})", options.time, found_time);
    println!("thermal mesh = {} cells", case.mesh.cells.len());
    println!("solid mesh   = {} cells", solid.ncell());
    println!("min          = {:?}", min);
    println!("mean         = {:?}", mean);
    println!("max          = {:?}", max);

    // write the mapped field
    if let Some(path) = &options.output {
        let mut file = File::create(path).map_err(|_| Error::config(format!("cannot create {:?}", path)))?;
        serde_json::to_writer(&mut file, &mapped).map_err(|_| Error::config(format!("cannot write {:?}", path)))?;
        println!("mapped field written to {:?}", path);
    }
    Ok(())
}
