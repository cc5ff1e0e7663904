pub const COULOMB_CONSTANT: f64 = 332.0637; // In kcal·Å/(mol·e²)
pub const STERIC_HARDNESS: f64 = 38.0;

/// Cubic Hermite step: 0 at `t <= 0`, 1 at `t >= 1`, zero slope at both ends.
#[inline]
pub fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Piecewise steric potential.
///
/// Quadratic repulsion inside the core, a well reaching `-well_depth` at
/// `radius_sum`, then a smooth decay that reaches zero at `cutoff`.
///
/// A cutoff at or inside `radius_sum` moves the well minimum to the midpoint
/// between the core and the cutoff. When the core leaves no room for a well,
/// the repulsion is lowered so that it ends at `-well_depth`.
#[inline]
pub fn steric(dist: f64, core_sum: f64, radius_sum: f64, well_depth: f64, cutoff: f64) -> f64 {
    if dist >= cutoff {
        return 0.0;
    }
    let (core, minimum) = if radius_sum < cutoff {
        (core_sum.min(radius_sum), radius_sum)
    } else {
        let core = core_sum.min(cutoff);
        (core, 0.5 * (core + cutoff))
    };
    let floor = if core >= minimum && minimum < cutoff {
        -well_depth
    } else {
        0.0
    };

    if dist < core {
        let penetration = 1.0 - dist / core;
        STERIC_HARDNESS * penetration * penetration + floor
    } else if dist < minimum {
        -well_depth * smoothstep((dist - core) / (minimum - core))
    } else {
        -well_depth * (1.0 - smoothstep((dist - minimum) / (cutoff - minimum)))
    }
}

/// Non-polar desolvation as a function of the surface gap `dist - radius_sum`.
///
/// When `radius_sum + npnp_cutoff` reaches past `cutoff`, both lengths are scaled
/// down so that the tail still ends at the cutoff.
#[inline]
pub fn desolvation(
    dist: f64,
    radius_sum: f64,
    npnp_cutoff: f64,
    strength: f64,
    cutoff: f64,
) -> f64 {
    if npnp_cutoff <= 0.0 || dist >= cutoff {
        return 0.0;
    }
    let reach = radius_sum + npnp_cutoff;
    let scale = if reach > cutoff { cutoff / reach } else { 1.0 };
    let (contact, range) = (radius_sum * scale, npnp_cutoff * scale);

    let gap = dist - contact;
    if gap <= 0.0 {
        -strength
    } else if gap < range {
        -strength * (1.0 - gap / range)
    } else {
        0.0
    }
}

/// Coulomb interaction damped so that it vanishes smoothly at `cutoff`.
#[inline]
pub fn damped_coulomb(dist: f64, q1: f64, q2: f64, dielectric: f64, cutoff: f64) -> f64 {
    if dist >= cutoff {
        return 0.0;
    }
    let x = dist / cutoff;
    let damping = (1.0 - x * x).powi(2);
    COULOMB_CONSTANT * q1 * q2 / (dielectric * dist) * damping
}
