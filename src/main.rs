use pluscode_rs::{PlusCodeError, decode, encode, shorten};

fn main() -> Result<(), PlusCodeError> {
    let lon = -2.2479699500757597;
    let lat = 53.48082746395233;

    let code = encode(&(lon, lat), 10)?;
    println!("Plus code: {}", code);

    let area = decode(&code)?;
    println!(
        "Center: ({}, {})",
        area.longitude_center(),
        area.latitude_center()
    );
    println!(
        "Box: {} x {} degrees",
        area.north - area.south,
        area.east - area.west
    );

    let short = shorten(&code, &(lon + 0.01, lat + 0.01))?;
    println!("Near a reference 0.01 degrees away: {}", short);

    let json =
        serde_json::to_string_pretty(&area).map_err(|e| PlusCodeError::IoError(e.to_string()))?;
    println!("{}", json);

    Ok(())
}
