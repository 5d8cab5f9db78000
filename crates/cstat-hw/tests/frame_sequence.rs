//! Full per-frame sequencing tests over the software register model.
//!
//! These run the same entry points a capture pipeline would, in the same
//! order, and assert on the write log instead of hardware state.

use cstat_chip::bns::BnsRatio;
use cstat_chip::dma::DmaChannel;
use cstat_chip::fmt::{HwFormat, PixelFormat, PixelOrder, SbwcMode};
use cstat_chip::irq::int1;
use cstat_chip::regs::{self, corex, global};
use cstat_hw::bns::{self, MinOutput};
use cstat_hw::control::{self, InputBitWidth};
use cstat_hw::corex as corex_seq;
use cstat_hw::crop::CropRect;
use cstat_hw::dma::{self, DmaCommand, DmaOps, DmaParam};
use cstat_hw::irq;
use cstat_hw::lic::{self, InputPath, LicConfig, LicMode};
use cstat_hw::{RegisterBase, Result, SimRegisters};
use tracing_subscriber::EnvFilter;

/// Route engine logs through the test harness; `RUST_LOG` filters them.
fn init_logs() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Recording DMA engine double.
#[derive(Debug, Default)]
struct SeqDma {
    calls: Vec<&'static str>,
    enabled: Option<bool>,
}

impl DmaOps for SeqDma {
    fn set_format(&mut self, _code: u32) -> Result<()> {
        self.calls.push("format");
        Ok(())
    }
    fn set_size(&mut self, _w: u32, _h: u32) -> Result<()> {
        self.calls.push("size");
        Ok(())
    }
    fn set_img_stride(&mut self, _plane: u32, _stride: u32) -> Result<()> {
        self.calls.push("img_stride");
        Ok(())
    }
    fn set_header_stride(&mut self, _stride: u32) -> Result<()> {
        self.calls.push("header_stride");
        Ok(())
    }
    fn set_comp_sbwc_en(&mut self, _code: u32) -> Result<()> {
        self.calls.push("sbwc");
        Ok(())
    }
    fn set_comp_64b_align(&mut self, _align: bool) -> Result<()> {
        self.calls.push("64b_align");
        Ok(())
    }
    fn set_comp_rate(&mut self, _rate: u32) -> Result<()> {
        self.calls.push("comp_rate");
        Ok(())
    }
    fn set_img_addr(&mut self, _plane: u32, _addrs: &[u64]) -> Result<()> {
        self.calls.push("img_addr");
        Ok(())
    }
    fn set_header_addr(&mut self, _plane: u32, _addrs: &[u64]) -> Result<()> {
        self.calls.push("header_addr");
        Ok(())
    }
    fn votf_enable(&mut self, _enable: bool) -> Result<()> {
        self.calls.push("votf");
        Ok(())
    }
    fn enable(&mut self, enable: bool) -> Result<()> {
        self.calls.push("enable");
        self.enabled = Some(enable);
        Ok(())
    }
}

fn bayer_param(cmd: DmaCommand) -> DmaParam {
    DmaParam {
        cmd,
        format: PixelFormat {
            hw: HwFormat::Bayer,
            bit_width: 12,
            packed: true,
            order: PixelOrder::Cfa,
            planes: 1,
        },
        sbwc: SbwcMode::None,
        comp_rate: 0,
        width: 4032,
        height: 3024,
        crop: CropRect { x: 0, y: 0, w: 4032, h: 3024 },
        out_w: 4032,
        out_h: 3024,
        dva: vec![0x8000_0000],
        num_planes: 1,
        num_buffers: 1,
        buffer_index: 0,
        votf: false,
    }
}

fn cds_param() -> DmaParam {
    DmaParam {
        format: PixelFormat {
            hw: HwFormat::Yuv420,
            bit_width: 8,
            packed: false,
            order: PixelOrder::YCbCr,
            planes: 2,
        },
        crop: CropRect { x: 0, y: 0, w: 4032, h: 3024 },
        out_w: 1280,
        out_h: 720,
        dva: vec![0x9000_0000, 0x9100_0000],
        num_planes: 2,
        ..bayer_param(DmaCommand::Enable)
    }
}

/// Position of the first write to `offset` in the log.
fn first_write(log: &[(usize, u32)], offset: usize) -> usize {
    log.iter()
        .position(|&(o, _)| o == offset)
        .unwrap_or_else(|| panic!("no write to {offset:#x}"))
}

#[test]
fn full_frame_sequence_orders_corex_before_one_shot() {
    init_logs();
    let sim = SimRegisters::new();
    sim.preload(regs::IDLE_STATUS, 1);

    control::reset(&sim).expect("reset");
    corex_seq::enable(&sim, true, false);
    control::select_input(&sim, InputPath::Otf, Some(InputBitWidth::B12));

    let frame = CropRect { x: 0, y: 0, w: 4032, h: 3024 };
    control::set_default_blocks(&sim, &frame);

    let ratio = bns::select_ratio(&frame, MinOutput { w: 2016, h: 1512 }, BnsRatio::X1_0);
    assert_eq!(ratio, BnsRatio::X2_0);
    let binned = bns::configure(&sim, ratio, &frame);
    assert_eq!((binned.w, binned.h), (2016, 1512));

    let mut cds = SeqDma::default();
    let negotiated = dma::configure_wdma(&sim, &mut cds, DmaChannel::WdmaCds, &cds_param(), ratio)
        .expect("CDS WDMA");
    assert!(negotiated.is_some());
    assert_eq!(cds.enabled, Some(true));

    lic::configure(
        &sim,
        &LicConfig {
            mode: LicMode::Dynamic,
            input_path: InputPath::Otf,
            half_ppc: false,
            static_sizes: [0; 4],
            single_context: 0,
        },
    );
    lic::set_sram_offsets(&sim, &binned);

    irq::enable_interrupts(&sim);
    control::one_shot_enable(&sim).expect("one-shot");

    let log = sim.write_log();
    let corex_on = first_write(&log, regs::COREX_ENABLE);
    let irq_on = first_write(&log, regs::INT1_ENABLE);
    let shot = first_write(&log, regs::ONE_SHOT_ENABLE);
    assert!(corex_on < irq_on, "COREX must be armed before interrupts");
    assert!(irq_on < shot, "interrupts must be armed before the trigger");

    // The one-shot trigger is a 0-then-1 pulse and the FRO trigger leads it.
    assert_eq!(sim.writes_to(regs::ONE_SHOT_ENABLE), vec![0, 1]);
    assert_eq!(sim.writes_to(regs::FRO_ONE_SHOT_ENABLE), vec![0, 1]);
    let fro_shot = first_write(&log, regs::FRO_ONE_SHOT_ENABLE);
    assert!(fro_shot < shot);
}

#[test]
fn rdma_program_order_ends_with_enable() {
    let mut ops = SeqDma::default();
    dma::configure_rdma(&mut ops, DmaChannel::RdmaBayer, &bayer_param(DmaCommand::Enable))
        .expect("RDMA");
    assert_eq!(ops.enabled, Some(true));
    assert_eq!(ops.calls.first(), Some(&"format"));
    assert_eq!(ops.calls.last(), Some(&"enable"));
    assert!(ops.calls.contains(&"img_addr"));
    // Uncompressed: no header programming.
    assert!(!ops.calls.contains(&"header_stride"));
    assert!(!ops.calls.contains(&"header_addr"));
}

#[test]
fn disable_after_hw_mode_restores_sw_trigger() {
    let sim = SimRegisters::new();
    corex_seq::enable(&sim, true, false);
    assert_eq!(
        sim.read_field(regs::COREX_UPDATE_MODE_0, corex::MODE),
        corex::MODE_HW
    );

    corex_seq::enable(&sim, false, false);
    assert_eq!(sim.read_field(regs::COREX_ENABLE, corex::ENABLE), 0);
    assert_eq!(
        sim.read_field(regs::COREX_UPDATE_MODE_0, corex::MODE),
        corex::MODE_SW
    );
}

#[test]
fn stuck_copy_engine_polls_exactly_the_budget() {
    let sim = SimRegisters::new();
    sim.preload(regs::COREX_STATUS_0, 1); // busy forever
    corex_seq::wait_idle(&sim);
    assert_eq!(sim.read_count(regs::COREX_STATUS_0), 10_000);
}

#[test]
fn global_disable_pulses_the_clear_path() {
    let sim = SimRegisters::new();
    control::set_global_enable(&sim, true);
    assert_eq!(sim.read_field(regs::GLOBAL_ENABLE, global::ENABLE), 1);
    assert_eq!(sim.read_field(regs::STOP_ON_CORRUPT, global::STOP_EN), 1);

    control::set_global_enable(&sim, false);
    assert_eq!(sim.read_field(regs::GLOBAL_ENABLE, global::ENABLE), 0);
    assert!(!sim.writes_to(regs::GLOBAL_ENABLE_CLEAR).is_empty());
}

#[test]
fn post_frame_status_readout_classifies_and_clears() {
    let sim = SimRegisters::new();
    sim.preload(regs::INT1_STATUS, int1::FRAME_END | int1::ERR_LIC_OVERFLOW);
    sim.preload(regs::FRO_INT0_STATUS, int1::FRAME_START);

    let status = irq::int1_status(&sim, true);
    assert!(irq::is_occurred(status, irq::EventType::FrameEnd));
    assert!(irq::is_occurred(status, irq::EventType::FrameStart));
    assert!(irq::is_occurred(status, irq::EventType::Err));
    irq::print_err(0, status);

    assert_eq!(
        sim.writes_to(regs::INT1_CLEAR),
        vec![int1::FRAME_END | int1::ERR_LIC_OVERFLOW]
    );
    assert_eq!(sim.writes_to(regs::FRO_INT0_CLEAR), vec![int1::FRAME_START]);
}
