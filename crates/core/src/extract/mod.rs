//! Structured spec extraction from free-text product names.
//!
//! Retail listing titles pack the interesting hardware into loosely
//! conventional notation ("ASUS Vivobook 15 (i5/16/512 GB) 15.6\" bærbar").
//! Each submodule owns an ordered table of patterns, most specific first,
//! where the first match wins. Absence of a match leaves the corresponding
//! field unset; nothing in here errors.

pub mod cpu;
pub mod gpu;
pub mod memory;
pub mod screen;

use crate::domain::product::ExtractedSpecs;

/// Extract structured specs from a product title and optional marketing text.
///
/// The marketing blurb is searched ahead of the title when present, since it
/// tends to spell out specs the title abbreviates.
pub fn extract_specs(title: &str, description: Option<&str>) -> ExtractedSpecs {
    let text = match description {
        Some(blurb) if !blurb.trim().is_empty() => format!("{blurb}\n{title}"),
        _ => title.to_owned(),
    };

    let cpu = cpu::extract_cpu(&text);
    let cpu_tier = cpu.as_deref().map(cpu::cpu_tier);
    let gpu = gpu::extract_gpu(&text);
    let gpu_tier = gpu.as_deref().map(gpu::gpu_tier);
    let memory = memory::extract_memory(&text);

    ExtractedSpecs {
        cpu,
        cpu_tier,
        gpu,
        gpu_tier,
        ram: memory.ram,
        ram_gb: memory.ram_gb,
        storage: memory.storage,
        storage_gb: memory.storage_gb,
        screen_size: screen::extract_screen(&text),
    }
}
