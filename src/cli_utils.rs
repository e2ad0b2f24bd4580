use trailwalker::{GridCoord, Obstacle, TrailError, TrailResult};

/// Generic parser for delimited strings that return fixed-size arrays
pub fn parse_delimited<T, const N: usize>(
    input: &str,
    delimiter: char,
    type_name: &str,
) -> TrailResult<[T; N]>
where
    T: Copy + Default + std::str::FromStr,
{
    let parts: Vec<&str> = input.split(delimiter).map(str::trim).collect();
    if parts.len() != N {
        return Err(TrailError::InvalidArgument {
            reason: format!(
                "Invalid {type_name} format '{input}'. Expected {N} {delimiter}-separated values"
            ),
        });
    }

    let mut result = [T::default(); N];
    for (i, part) in parts.iter().enumerate() {
        result[i] = part.parse().map_err(|_| TrailError::InvalidArgument {
            reason: format!("Invalid {type_name} value: '{part}'"),
        })?;
    }

    Ok(result)
}

/// Parse canvas size string "WIDTHxHEIGHT" in pixels
pub fn parse_size(size_str: &str) -> TrailResult<(u32, u32)> {
    let [width, height] = parse_delimited::<u32, 2>(size_str, 'x', "size")?;

    if width == 0 || height == 0 {
        return Err(TrailError::InvalidArgument {
            reason: "Width and height must be greater than 0".to_string(),
        });
    }

    Ok((width, height))
}

/// Parse pixel click string "X,Y"; negative values are allowed and later ignored as off-canvas
pub fn parse_click(click_str: &str) -> TrailResult<(i64, i64)> {
    let [x, y] = parse_delimited::<i64, 2>(click_str, ',', "click")?;
    Ok((x, y))
}

/// Parse a circular obstacle "X,Y" or "X,Y,R" in cells; the radius defaults to 0
pub fn parse_block(block_str: &str) -> TrailResult<Obstacle> {
    let (center, radius) = if block_str.matches(',').count() == 2 {
        let [x, y, r] = parse_delimited::<u32, 3>(block_str, ',', "block")?;
        ((x, y), r)
    } else {
        let [x, y] = parse_delimited::<u32, 2>(block_str, ',', "block")?;
        ((x, y), 0)
    };

    Ok(Obstacle::Circle {
        center: center.into(),
        radius,
    })
}

/// Parse a rectangular obstacle "X1,Y1,X2,Y2" in cells, corners inclusive
pub fn parse_block_rect(rect_str: &str) -> TrailResult<Obstacle> {
    let [x1, y1, x2, y2] = parse_delimited::<u32, 4>(rect_str, ',', "block rectangle")?;
    Ok(Obstacle::Rectangle {
        a: GridCoord::new(x1, y1),
        b: GridCoord::new(x2, y2),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("400x300").unwrap(), (400, 300));
        assert!(parse_size("0x300").is_err());
        assert!(parse_size("400").is_err());
        assert!(parse_size("ax3").is_err());
    }

    #[test]
    fn test_parse_click() {
        assert_eq!(parse_click("12, 40").unwrap(), (12, 40));
        assert_eq!(parse_click("-5,3").unwrap(), (-5, 3));
        assert!(parse_click("1,2,3").is_err());
    }

    #[test]
    fn test_parse_block() {
        assert_eq!(
            parse_block("3,4").unwrap(),
            Obstacle::Circle {
                center: GridCoord::new(3, 4),
                radius: 0
            }
        );
        assert_eq!(
            parse_block("3, 4, 2").unwrap(),
            Obstacle::Circle {
                center: GridCoord::new(3, 4),
                radius: 2
            }
        );
        assert!(parse_block("3").is_err());
        assert!(parse_block("-1,4").is_err());
        assert!(parse_block("1,2,3,4").is_err());
    }

    #[test]
    fn test_parse_block_rect() {
        assert_eq!(
            parse_block_rect("10,0,10,20").unwrap(),
            Obstacle::Rectangle {
                a: GridCoord::new(10, 0),
                b: GridCoord::new(10, 20)
            }
        );
        assert!(parse_block_rect("1,2,3").is_err());
    }
}
