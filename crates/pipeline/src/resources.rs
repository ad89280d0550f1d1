// This file is part of Sorauth.
//
// Sorauth is free software: you can redistribute it and/or modify it under the
// terms of the GNU Lesser General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version.
//
// Sorauth is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with Sorauth.
// If not, see https://www.gnu.org/licenses/.

use stellar_xdr::curr::SorobanResources;

/// Overflow of a resource or fee computation. Always fatal; budgets are
/// never silently wrapped or clamped.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// Instruction budget would exceed its representable range
    #[error("instruction budget overflow: {0} + {1}")]
    InstructionsOverflow(u32, u32),
    /// Disk read budget would exceed its representable range
    #[error("disk read byte budget overflow: {0} + {1}")]
    DiskReadBytesOverflow(u32, u32),
    /// Write budget would exceed its representable range
    #[error("write byte budget overflow: {0} + {1}")]
    WriteBytesOverflow(u32, u32),
    /// Resource fee would exceed its representable range
    #[error("resource fee overflow: {0} * {1}")]
    FeeOverflow(i64, i64),
}

/// Bumps the resource budget by the given increments and scales the resource
/// fee by the multiplier, with checked arithmetic throughout. The footprint
/// is carried over untouched.
///
/// The additive bumps cover the verification call's execution; the fee is
/// multiplied rather than bumped because the added work's fee is volatile
/// and a flat margin underprices it.
pub fn recompute_resources(
    resources: &SorobanResources,
    resource_fee: i64,
    extra_instructions: u32,
    extra_disk_read_bytes: u32,
    extra_write_bytes: u32,
    fee_multiplier: i64,
) -> Result<(SorobanResources, i64), ResourceError> {
    let instructions = resources
        .instructions
        .checked_add(extra_instructions)
        .ok_or(ResourceError::InstructionsOverflow(
            resources.instructions,
            extra_instructions,
        ))?;
    let disk_read_bytes = resources
        .disk_read_bytes
        .checked_add(extra_disk_read_bytes)
        .ok_or(ResourceError::DiskReadBytesOverflow(
            resources.disk_read_bytes,
            extra_disk_read_bytes,
        ))?;
    let write_bytes = resources
        .write_bytes
        .checked_add(extra_write_bytes)
        .ok_or(ResourceError::WriteBytesOverflow(
            resources.write_bytes,
            extra_write_bytes,
        ))?;
    let fee = resource_fee
        .checked_mul(fee_multiplier)
        .ok_or(ResourceError::FeeOverflow(resource_fee, fee_multiplier))?;

    Ok((
        SorobanResources {
            footprint: resources.footprint.clone(),
            instructions,
            disk_read_bytes,
            write_bytes,
        },
        fee,
    ))
}
