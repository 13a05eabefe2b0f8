// demos/split_dateline.rs

use xs_dateline::{split_rings, try_split, Location, Pole, SplitError};

fn print_rings(label: &str, rings: &[Vec<Location>]) {
  for (i, ring) in rings.iter().enumerate() {
    let coords: Vec<String> = ring
      .iter()
      .map(|p| format!("({:.3}, {:.3})", p.latitude, p.longitude))
      .collect();
    println!("  {label} ring {i}: {}", coords.join(" "));
  }
}

fn main() -> Result<(), SplitError> {
  println!("--- Dateline Split Example ---");

  // A box over Fiji straddling the antimeridian.
  let fiji = vec![
    Location::try_new(-20.0, 176.0)?,
    Location::try_new(-20.0, -178.0)?,
    Location::try_new(-15.0, -178.0)?,
    Location::try_new(-15.0, 176.0)?,
    Location::try_new(-20.0, 176.0)?,
  ];
  let result = try_split(&fiji, true)?;
  println!("Fiji box: {} rings, pole {:?}", result.polygons.len(), result.pole);
  print_rings("fiji", &result.polygons);

  // A ring around Antarctica, crossing the dateline once.
  let antarctica: Vec<Location> = (0..8)
    .map(|i| Location::new(-65.0, -157.5 + 45.0 * f64::from(i)))
    .collect();
  let result = try_split(&antarctica, true)?;
  assert_eq!(result.pole, Pole::South);
  println!(
    "Antarctic cap: {} ring(s), pole {:?} in ring {:?}",
    result.polygons.len(),
    result.pole,
    result.pole_index
  );
  print_rings("cap", &result.polygons);

  // Boundary and hole are split independently.
  let outer = vec![
    Location::new(-10.0, 160.0),
    Location::new(-10.0, -160.0),
    Location::new(40.0, -160.0),
    Location::new(40.0, 160.0),
  ];
  let hole = vec![
    Location::new(0.0, 175.0),
    Location::new(0.0, -175.0),
    Location::new(20.0, -175.0),
    Location::new(20.0, 175.0),
  ];
  for (name, result) in ["outer", "hole"].iter().zip(split_rings(&[outer, hole], true)) {
    println!("{name}: {} rings", result.polygons.len());
    print_rings(name, &result.polygons);
  }

  Ok(())
}
