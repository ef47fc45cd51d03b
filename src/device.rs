//! High-level driver API for the BMA400
//!
//! This module provides the user-facing interface to the BMA400: device
//! discovery, power and sampling configuration, acceleration reads, and the
//! interrupt feature engines.
//!
//! The driver keeps no shadow copies of device registers. Every getter reads
//! the device and every setter writes it, using read-modify-write whenever a
//! register holds fields owned by other operations.

use crate::accelerometer::{AccelData, AccelDataG, AccelRange, OutputDataRate};
use crate::interface::I2cInterface;
use crate::interrupt::{
    generic_duration_from_ms, orientation_duration_from_ms, threshold_from_mg,
    threshold_from_mg_rounded, ActivityChangeConfig, Command, DataSource, GenericInterrupt,
    GenericInterruptConfig, GenericInterruptMode, InterruptPin, InterruptPinConfig,
    InterruptSource, OrientationConfig, OrientationDataSource, TapConfig,
};
use crate::power::{
    split_timeout_ticks, timeout_ms_from_fields, timeout_ticks_from_ms, AutoLowPowerConfig,
    AutoLowPowerTimeoutMode, PowerMode,
};
use crate::registers::{self, Bma400 as RegisterDevice};
use crate::{Error, BMA400_ADDRESS_PRIMARY, BMA400_ADDRESS_SECONDARY, CHIP_ID_VALUE};

use device_driver::RegisterInterface;

/// Sources routed through a bit in both `INT1_MAP` and `INT2_MAP`
const PIN_MAP_SOURCES: InterruptSource = InterruptSource::WAKEUP
    .union(ORIENTATION_SOURCES)
    .union(InterruptSource::GENERIC_INTERRUPT_1)
    .union(InterruptSource::GENERIC_INTERRUPT_2)
    .union(InterruptSource::ENGINE_OVERRUN)
    .union(InterruptSource::FIFO_FULL)
    .union(InterruptSource::FIFO_WATERMARK)
    .union(InterruptSource::DATA_READY);

/// Sources routed through a bit pair in `INT12_MAP`
const FEATURE_MAP_SOURCES: InterruptSource = STEP_SOURCES
    .union(TAP_SOURCES)
    .union(InterruptSource::ACTIVITY_CHANGE);

const ORIENTATION_SOURCES: InterruptSource = InterruptSource::ORIENTATION_CHANGE
    .union(InterruptSource::ORIENTATION_CHANGE_X)
    .union(InterruptSource::ORIENTATION_CHANGE_Y)
    .union(InterruptSource::ORIENTATION_CHANGE_Z);

const STEP_SOURCES: InterruptSource =
    InterruptSource::STEP_DETECTOR.union(InterruptSource::STEP_DETECTOR_DOUBLE_STEP);

const TAP_SOURCES: InterruptSource =
    InterruptSource::SINGLE_TAP.union(InterruptSource::DOUBLE_TAP);

/// Set or clear every `INTx_MAP` bit selected by `$source`
macro_rules! route_pin_map {
    (
        $w:ident, $source:expr, $on:expr,
        $wkup:ident, $orientch:ident, $gen1:ident, $gen2:ident,
        $overrun:ident, $ffull:ident, $fwm:ident, $drdy:ident $(,)?
    ) => {{
        let source: InterruptSource = $source;
        let on: bool = $on;
        if source.contains(InterruptSource::WAKEUP) {
            $w.$wkup(on);
        }
        if source.intersects(ORIENTATION_SOURCES) {
            $w.$orientch(on);
        }
        if source.contains(InterruptSource::GENERIC_INTERRUPT_1) {
            $w.$gen1(on);
        }
        if source.contains(InterruptSource::GENERIC_INTERRUPT_2) {
            $w.$gen2(on);
        }
        if source.contains(InterruptSource::ENGINE_OVERRUN) {
            $w.$overrun(on);
        }
        if source.contains(InterruptSource::FIFO_FULL) {
            $w.$ffull(on);
        }
        if source.contains(InterruptSource::FIFO_WATERMARK) {
            $w.$fwm(on);
        }
        if source.contains(InterruptSource::DATA_READY) {
            $w.$drdy(on);
        }
    }};
}

/// Generate the method writing one generic interrupt engine's `CONFIG0..CONFIG31`
macro_rules! generic_interrupt_writer {
    ($name:ident, $config0:ident, $config1:ident, $config2:ident, $config3:ident, $config31:ident) => {
        fn $name(
            &mut self,
            config: &GenericInterruptConfig,
            threshold: u8,
            duration: u16,
        ) -> Result<(), Error<I::Error>> {
            let [duration_msb, duration_lsb] = duration.to_be_bytes();

            self.device.$config0().write(|w| {
                w.set_act_hyst(config.hysteresis as u8);
                w.set_act_refu(config.reference_update as u8);
                w.set_data_src(config.data_source == DataSource::AccFilt2);
                w.set_act_x_en(config.x_axis);
                w.set_act_y_en(config.y_axis);
                w.set_act_z_en(config.z_axis);
            })?;
            self.device.$config1().write(|w| {
                w.set_comb_sel(config.combine_all_axes);
                w.set_criterion_sel(config.mode == GenericInterruptMode::Activity);
            })?;
            self.device.$config2().write(|w| {
                w.set_threshold(threshold);
            })?;
            self.device.$config3().write(|w| {
                w.set_duration_msb(duration_msb);
            })?;
            self.device.$config31().write(|w| {
                w.set_duration_lsb(duration_lsb);
            })?;
            Ok(())
        }
    };
}

/// Main driver for the BMA400
pub struct Bma400Driver<I> {
    device: RegisterDevice<I>,
}

impl<I> Bma400Driver<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Create a new BMA400 driver instance
    ///
    /// No bus traffic happens here. Call [`init()`](Self::init) (or
    /// [`init_with_address_probe()`](Self::init_with_address_probe) for I2C)
    /// to check that a BMA400 answers.
    pub fn new(interface: I) -> Self {
        Self {
            device: RegisterDevice::new(interface),
        }
    }

    /// Check the chip ID at the bound address
    ///
    /// Returns `Ok(false)` if a device answered with a different chip ID.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn init(&mut self) -> Result<bool, Error<I::Error>> {
        let chip_id = self.read_chip_id()?;

        #[cfg(feature = "defmt")]
        {
            if chip_id != CHIP_ID_VALUE {
                defmt::warn!("Unexpected chip ID {=u8:#x}", chip_id);
            }
        }

        Ok(chip_id == CHIP_ID_VALUE)
    }

    /// Read the `CHIP_ID` register
    ///
    /// Should return 0x90 for a valid BMA400
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_chip_id(&mut self) -> Result<u8, Error<I::Error>> {
        let reg = self.device.chip_id().read()?;
        Ok(reg.chip_id())
    }

    /// Quick setup: power mode, then range, then data rate
    ///
    /// All three arguments are checked before anything is written.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails, or
    /// `InvalidConfig` if any argument is an `Unknown` variant.
    pub fn setup(
        &mut self,
        mode: PowerMode,
        rate: OutputDataRate,
        range: AccelRange,
    ) -> Result<(), Error<I::Error>> {
        if mode.selector().is_none() || range.bits().is_none() || rate.data_source().is_none() {
            return Err(Error::InvalidConfig);
        }

        self.set_power_mode(mode)?;
        self.set_range(range)?;
        self.set_data_rate(rate)
    }

    /// Run a command through the `CMD` register
    ///
    /// The command is only sent when the command decoder reports ready.
    /// Returns `Ok(false)` without writing anything otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn execute_command(&mut self, command: Command) -> Result<bool, Error<I::Error>> {
        if !self.device.status().read()?.cmd_rdy() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Command {} not sent: command decoder busy", command);
            return Ok(false);
        }

        self.device.cmd().write(|w| {
            w.set_cmd(command as u8);
        })?;
        Ok(true)
    }

    // ==================== POWER MODE ====================

    /// Read the current power mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_power_mode(&mut self) -> Result<PowerMode, Error<I::Error>> {
        let config0 = self.device.acc_config_0().read()?;
        let config1 = self.device.acc_config_1().read()?;
        Ok(PowerMode::from_fields(
            config0.power_mode_conf(),
            config0.osr_lp(),
            config1.osr(),
        ))
    }

    /// Set the power mode
    ///
    /// Sleep only changes the selector. Low-power modes also set the
    /// low-power oversampling ratio; normal modes set the normal
    /// oversampling ratio in `ACC_CONFIG1`.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails, or
    /// `InvalidConfig` for [`PowerMode::Unknown`].
    pub fn set_power_mode(&mut self, mode: PowerMode) -> Result<(), Error<I::Error>> {
        let selector = mode.selector().ok_or(Error::InvalidConfig)?;
        let oversampling = mode.oversampling();

        self.device.acc_config_0().modify(|w| {
            w.set_power_mode_conf(selector);
            if let (true, Some(osr)) = (mode.is_low_power(), oversampling) {
                w.set_osr_lp(osr);
            }
        })?;

        if let (true, Some(osr)) = (mode.is_normal(), oversampling) {
            self.device.acc_config_1().modify(|w| {
                w.set_osr(osr);
            })?;
        }

        Ok(())
    }

    // ==================== SAMPLING ====================

    /// Set the output data rate and filter
    ///
    /// Filter 1 rates write the bandwidth bit and the ODR code and select
    /// filter 1 as data source. The fixed 100 Hz filter 2 rates only change
    /// the data source.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails, or
    /// `InvalidConfig` for [`OutputDataRate::Unknown`].
    pub fn set_data_rate(&mut self, rate: OutputDataRate) -> Result<(), Error<I::Error>> {
        let source = rate.data_source().ok_or(Error::InvalidConfig)?;

        if let Some((odr, bandwidth_024)) = rate.filter1_fields() {
            self.device.acc_config_0().modify(|w| {
                w.set_filt_1_bw(bandwidth_024);
            })?;
            self.device.acc_config_1().modify(|w| {
                w.set_acc_odr(odr);
            })?;
        }

        self.device.acc_config_2().modify(|w| {
            w.set_data_src_reg(source);
        })?;
        Ok(())
    }

    /// Read the current output data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_data_rate(&mut self) -> Result<OutputDataRate, Error<I::Error>> {
        let source = self.device.acc_config_2().read()?.data_src_reg();
        let config0 = self.device.acc_config_0().read()?;
        let config1 = self.device.acc_config_1().read()?;
        Ok(OutputDataRate::from_fields(
            source,
            config1.acc_odr(),
            config0.filt_1_bw(),
        ))
    }

    /// Set the measurement range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails, or
    /// `InvalidConfig` for [`AccelRange::Unknown`].
    pub fn set_range(&mut self, range: AccelRange) -> Result<(), Error<I::Error>> {
        let bits = range.bits().ok_or(Error::InvalidConfig)?;
        self.device.acc_config_1().modify(|w| {
            w.set_acc_range(bits);
        })?;
        Ok(())
    }

    /// Read the current measurement range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_range(&mut self) -> Result<AccelRange, Error<I::Error>> {
        let reg = self.device.acc_config_1().read()?;
        Ok(AccelRange::from_bits(reg.acc_range()))
    }

    /// Read raw acceleration
    ///
    /// All six data bytes are read in one burst so the axes belong to the
    /// same sample.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_acceleration_raw(&mut self) -> Result<AccelData, Error<I::Error>> {
        let buffer = self.read_acceleration_bytes()?;
        Ok(AccelData::from_le_bytes(buffer))
    }

    /// Read acceleration in g
    ///
    /// The range is read back from the device after the sample.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_acceleration(&mut self) -> Result<AccelDataG, Error<I::Error>> {
        let raw = self.read_acceleration_raw()?;
        let range = self.get_range()?;
        Ok(raw.to_g(range))
    }

    fn read_acceleration_bytes(&mut self) -> Result<[u8; 6], Error<I::Error>> {
        let mut buffer = [0u8; 6];
        self.device
            .interface
            .read_register(registers::ACC_DATA_START, 48, &mut buffer)?;
        Ok(buffer)
    }

    // ==================== AUTO LOW POWER ====================

    /// Whether a data ready event drops the device into low power
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_auto_low_power_on_data_ready(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.auto_low_pow_1().read()?.drdy_lowpow_trig())
    }

    /// Whether generic interrupt 1 drops the device into low power
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_auto_low_power_on_generic_interrupt_1(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.auto_low_pow_1().read()?.gen_1_int())
    }

    /// Read the auto low-power timeout mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_auto_low_power_timeout_mode(
        &mut self,
    ) -> Result<AutoLowPowerTimeoutMode, Error<I::Error>> {
        let reg = self.device.auto_low_pow_1().read()?;
        Ok(AutoLowPowerTimeoutMode::from_bits(reg.auto_lp_timeout()))
    }

    /// Read the auto low-power timeout in milliseconds
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_auto_low_power_timeout(&mut self) -> Result<f32, Error<I::Error>> {
        let msb = self.device.auto_low_pow_0().read()?.auto_lp_timeout_thres_msb();
        let lsb = self.device.auto_low_pow_1().read()?.auto_lp_timeout_thres_lsb();
        Ok(timeout_ms_from_fields(msb, lsb))
    }

    /// Enable or disable entering low power after a data ready event
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_auto_low_power_on_data_ready(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.device.auto_low_pow_1().modify(|w| {
            w.set_drdy_lowpow_trig(enable);
        })?;
        Ok(())
    }

    /// Enable or disable entering low power on generic interrupt 1
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_auto_low_power_on_generic_interrupt_1(
        &mut self,
        enable: bool,
    ) -> Result<(), Error<I::Error>> {
        self.device.auto_low_pow_1().modify(|w| {
            w.set_gen_1_int(enable);
        })?;
        Ok(())
    }

    /// Set the auto low-power timeout, keeping the other triggers
    ///
    /// The timeout is rounded to the nearest 2.5 ms.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails, or
    /// `InvalidConfig` if `timeout_ms` is negative, not finite, or above
    /// 10237.5 ms.
    pub fn set_auto_low_power_timeout(
        &mut self,
        mode: AutoLowPowerTimeoutMode,
        timeout_ms: f32,
    ) -> Result<(), Error<I::Error>> {
        let ticks = timeout_ticks_from_ms(timeout_ms).ok_or(Error::InvalidConfig)?;
        let (msb, lsb) = split_timeout_ticks(ticks);

        self.device.auto_low_pow_0().write(|w| {
            w.set_auto_lp_timeout_thres_msb(msb);
        })?;
        self.device.auto_low_pow_1().modify(|w| {
            w.set_auto_lp_timeout(mode.bits());
            w.set_auto_lp_timeout_thres_lsb(lsb);
        })?;
        Ok(())
    }

    /// Apply a complete auto low-power configuration
    ///
    /// Every trigger in `AUTOLOWPOW_1` is overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails, or
    /// `InvalidConfig` if the timeout cannot be encoded.
    pub fn configure_auto_low_power(
        &mut self,
        config: &AutoLowPowerConfig,
    ) -> Result<(), Error<I::Error>> {
        let ticks = timeout_ticks_from_ms(config.timeout_ms).ok_or(Error::InvalidConfig)?;
        let (msb, lsb) = split_timeout_ticks(ticks);

        self.device.auto_low_pow_0().write(|w| {
            w.set_auto_lp_timeout_thres_msb(msb);
        })?;
        self.device.auto_low_pow_1().write(|w| {
            w.set_drdy_lowpow_trig(config.on_data_ready);
            w.set_gen_1_int(config.on_generic_interrupt_1);
            w.set_auto_lp_timeout(config.timeout_mode.bits());
            w.set_auto_lp_timeout_thres_lsb(lsb);
        })?;
        Ok(())
    }

    // ==================== INTERRUPT STATUS & ROUTING ====================

    /// Read all interrupt status flags
    ///
    /// In latched mode this read clears the latched flags.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_interrupts(&mut self) -> Result<InterruptSource, Error<I::Error>> {
        let mut status = [0u8; 3];
        self.device
            .interface
            .read_register(registers::INT_STAT_START, 24, &mut status)?;
        Ok(InterruptSource::from_status(status))
    }

    /// Check whether any of `source` is currently flagged
    ///
    /// This reads (and in latched mode clears) all status flags, so prefer
    /// [`get_interrupts()`](Self::get_interrupts) when several sources are
    /// enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn has_interrupt(&mut self, source: InterruptSource) -> Result<bool, Error<I::Error>> {
        Ok(self.get_interrupts()?.intersects(source))
    }

    /// Enable or disable basic interrupts (data ready, FIFO watermark, FIFO full)
    ///
    /// Other sources in `source` are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_basic_interrupt_enabled(
        &mut self,
        source: InterruptSource,
        enable: bool,
    ) -> Result<(), Error<I::Error>> {
        let basic = source.intersection(InterruptSource::BASIC);
        if basic.is_empty() {
            return Ok(());
        }

        self.device.int_config_0().modify(|w| {
            if basic.contains(InterruptSource::DATA_READY) {
                w.set_drdy_int_en(enable);
            }
            if basic.contains(InterruptSource::FIFO_WATERMARK) {
                w.set_fwm_int_en(enable);
            }
            if basic.contains(InterruptSource::FIFO_FULL) {
                w.set_ffull_int_en(enable);
            }
        })?;
        Ok(())
    }

    /// Enable or disable basic interrupts and route `source` to `pin`
    ///
    /// Only data ready, FIFO watermark and FIFO full have enable bits here,
    /// but every source in the set is routed.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn configure_basic_interrupt(
        &mut self,
        source: InterruptSource,
        enable: bool,
        pin: InterruptPin,
    ) -> Result<(), Error<I::Error>> {
        self.set_basic_interrupt_enabled(source, enable)?;
        self.link_to_interrupt_pin(source, pin)
    }

    /// Configure latch mode and the electrical behaviour of both pins
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn configure_interrupt_pin_settings(
        &mut self,
        config: &InterruptPinConfig,
    ) -> Result<(), Error<I::Error>> {
        self.device.int_config_1().modify(|w| {
            w.set_latch_int(config.latched);
        })?;
        self.device.int_12_io_ctrl().write(|w| {
            w.set_int_1_lvl(config.int1_active_high);
            w.set_int_1_od(config.int1_open_drain);
            w.set_int_2_lvl(config.int2_active_high);
            w.set_int_2_od(config.int2_open_drain);
        })?;
        Ok(())
    }

    /// Route interrupt sources to the interrupt pins
    ///
    /// Each source in the set is connected to the pins selected by `pin` and
    /// disconnected from the others. Sources that share a routing bit
    /// (orientation and its per-axis flags, step and double step, single and
    /// double tap) are always routed together.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn link_to_interrupt_pin(
        &mut self,
        source: InterruptSource,
        pin: InterruptPin,
    ) -> Result<(), Error<I::Error>> {
        let pin_map = source.intersection(PIN_MAP_SOURCES);
        if !pin_map.is_empty() {
            self.device.int_1_map().modify(|w| {
                route_pin_map!(
                    w,
                    pin_map,
                    pin.int1(),
                    set_wkup_int_1,
                    set_orientch_int_1,
                    set_gen_1_int_1,
                    set_gen_2_int_1,
                    set_ieng_overrun_int_1,
                    set_ffull_int_1,
                    set_fwm_int_1,
                    set_drdy_int_1,
                );
            })?;
            self.device.int_2_map().modify(|w| {
                route_pin_map!(
                    w,
                    pin_map,
                    pin.int2(),
                    set_wkup_int_2,
                    set_orientch_int_2,
                    set_gen_1_int_2,
                    set_gen_2_int_2,
                    set_ieng_overrun_int_2,
                    set_ffull_int_2,
                    set_fwm_int_2,
                    set_drdy_int_2,
                );
            })?;
        }

        let feature_map = source.intersection(FEATURE_MAP_SOURCES);
        if !feature_map.is_empty() {
            self.device.int_12_map().modify(|w| {
                if feature_map.intersects(STEP_SOURCES) {
                    w.set_step_int_1(pin.int1());
                    w.set_step_int_2(pin.int2());
                }
                if feature_map.intersects(TAP_SOURCES) {
                    w.set_tap_int_1(pin.int1());
                    w.set_tap_int_2(pin.int2());
                }
                if feature_map.contains(InterruptSource::ACTIVITY_CHANGE) {
                    w.set_actch_int_1(pin.int1());
                    w.set_actch_int_2(pin.int2());
                }
            })?;
        }

        Ok(())
    }

    /// Read the rate, raise it through `floor` and write it back if it changed
    fn apply_rate_floor(
        &mut self,
        floor: fn(OutputDataRate) -> OutputDataRate,
    ) -> Result<(), Error<I::Error>> {
        let rate = self.get_data_rate()?;
        let raised = floor(rate);
        if raised != rate {
            #[cfg(feature = "defmt")]
            defmt::debug!("Raising output data rate from {} to {}", rate, raised);
            self.set_data_rate(raised)?;
        }
        Ok(())
    }

    fn write_reference(&mut self, start: u8, bytes: [u8; 6]) -> Result<(), Error<I::Error>> {
        for (offset, byte) in (0u8..).zip(bytes) {
            self.device
                .interface
                .write_register(start + offset, 8, &[byte])?;
        }
        Ok(())
    }

    // ==================== GENERIC INTERRUPTS ====================

    generic_interrupt_writer!(
        write_generic_interrupt_1,
        gen_1_int_config_0,
        gen_1_int_config_1,
        gen_1_int_config_2,
        gen_1_int_config_3,
        gen_1_int_config_31
    );

    generic_interrupt_writer!(
        write_generic_interrupt_2,
        gen_2_int_config_0,
        gen_2_int_config_1,
        gen_2_int_config_2,
        gen_2_int_config_3,
        gen_2_int_config_31
    );

    fn set_generic_interrupt_enabled(
        &mut self,
        interrupt: GenericInterrupt,
        enable: bool,
    ) -> Result<(), Error<I::Error>> {
        self.device.int_config_0().modify(|w| match interrupt {
            GenericInterrupt::One => w.set_gen_1_int_en(enable),
            GenericInterrupt::Two => w.set_gen_2_int_en(enable),
        })?;
        Ok(())
    }

    /// Configure a generic interrupt with raw register values
    ///
    /// When `config.enable` is false only the enable bit is cleared and the
    /// rest of the configuration is left untouched. Otherwise the interrupt
    /// is routed, the data rate is raised to at least 100 Hz (unless
    /// `config.skip_rate_floor` is set), the interrupt is enabled, and all
    /// configuration registers are written.
    ///
    /// # Arguments
    /// * `interrupt` - Which generic interrupt engine to configure
    /// * `config` - Engine configuration
    /// * `threshold` - Threshold in 8 mg steps
    /// * `duration` - Duration in samples
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn configure_generic_interrupt_raw(
        &mut self,
        interrupt: GenericInterrupt,
        config: &GenericInterruptConfig,
        threshold: u8,
        duration: u16,
    ) -> Result<(), Error<I::Error>> {
        if !config.enable {
            return self.set_generic_interrupt_enabled(interrupt, false);
        }

        self.link_to_interrupt_pin(interrupt.source(), config.pin)?;

        if !config.skip_rate_floor {
            self.apply_rate_floor(OutputDataRate::with_generic_interrupt_floor)?;
        }

        self.set_generic_interrupt_enabled(interrupt, true)?;

        match interrupt {
            GenericInterrupt::One => self.write_generic_interrupt_1(config, threshold, duration),
            GenericInterrupt::Two => self.write_generic_interrupt_2(config, threshold, duration),
        }
    }

    /// Configure a generic interrupt with physical values
    ///
    /// The threshold is truncated to 8 mg steps. The duration is converted
    /// to samples at the data rate in effect after the 100 Hz floor.
    ///
    /// # Arguments
    /// * `interrupt` - Which generic interrupt engine to configure
    /// * `config` - Engine configuration
    /// * `threshold_mg` - Threshold in mg (0 to 2040)
    /// * `duration_ms` - Duration in milliseconds
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn configure_generic_interrupt(
        &mut self,
        interrupt: GenericInterrupt,
        config: &GenericInterruptConfig,
        threshold_mg: f32,
        duration_ms: f32,
    ) -> Result<(), Error<I::Error>> {
        let threshold = threshold_from_mg(threshold_mg);
        if !config.enable {
            return self.configure_generic_interrupt_raw(interrupt, config, threshold, 0);
        }

        let mut rate = self.get_data_rate()?;
        if !config.skip_rate_floor {
            rate = rate.with_generic_interrupt_floor();
        }
        let duration = generic_duration_from_ms(duration_ms, rate);

        self.configure_generic_interrupt_raw(interrupt, config, threshold, duration)
    }

    /// Write the reference vector of a generic interrupt
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails, or
    /// `InvalidConfig` if any axis is outside -2048..=2047.
    pub fn set_generic_interrupt_reference(
        &mut self,
        interrupt: GenericInterrupt,
        reference: &AccelData,
    ) -> Result<(), Error<I::Error>> {
        let bytes = reference.to_le_bytes_checked().ok_or(Error::InvalidConfig)?;
        self.write_reference(generic_reference_start(interrupt), bytes)
    }

    /// Use the current acceleration sample as a generic interrupt's reference
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn snapshot_generic_interrupt_reference(
        &mut self,
        interrupt: GenericInterrupt,
    ) -> Result<(), Error<I::Error>> {
        let sample = self.read_acceleration_bytes()?;
        self.write_reference(generic_reference_start(interrupt), sample)
    }

    // ==================== ACTIVITY CHANGE ====================

    /// Configure the activity change interrupt with a raw threshold
    ///
    /// When `config.enable` is false only the enable bit is cleared.
    ///
    /// # Arguments
    /// * `config` - Activity change configuration
    /// * `threshold` - Threshold in 8 mg steps
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn configure_activity_change_interrupt_raw(
        &mut self,
        config: &ActivityChangeConfig,
        threshold: u8,
    ) -> Result<(), Error<I::Error>> {
        if !config.enable {
            self.device.int_config_1().modify(|w| {
                w.set_actch_int_en(false);
            })?;
            return Ok(());
        }

        self.link_to_interrupt_pin(InterruptSource::ACTIVITY_CHANGE, config.pin)?;
        self.device.int_config_1().modify(|w| {
            w.set_actch_int_en(true);
        })?;

        self.device.actch_config_0().write(|w| {
            w.set_actch_thres(threshold);
        })?;
        self.device.actch_config_1().write(|w| {
            w.set_actch_npts(config.observations as u8);
            w.set_actch_data_src(config.data_source == DataSource::AccFilt2);
            w.set_actch_x_en(config.x_axis);
            w.set_actch_y_en(config.y_axis);
            w.set_actch_z_en(config.z_axis);
        })?;
        Ok(())
    }

    /// Configure the activity change interrupt with a threshold in mg
    ///
    /// The threshold is rounded to the nearest 8 mg step.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn configure_activity_change_interrupt(
        &mut self,
        config: &ActivityChangeConfig,
        threshold_mg: f32,
    ) -> Result<(), Error<I::Error>> {
        self.configure_activity_change_interrupt_raw(config, threshold_from_mg_rounded(threshold_mg))
    }

    // ==================== TAP ====================

    /// Configure single and double tap detection
    ///
    /// With both taps disabled only the two enable bits are cleared.
    /// Otherwise both tap interrupts are routed to `config.pin` and the data
    /// rate is raised to at least 200 Hz.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn configure_tap_interrupt(&mut self, config: &TapConfig) -> Result<(), Error<I::Error>> {
        if !config.single_tap && !config.double_tap {
            self.device.int_config_1().modify(|w| {
                w.set_s_tap_int_en(false);
                w.set_d_tap_int_en(false);
            })?;
            return Ok(());
        }

        self.link_to_interrupt_pin(InterruptSource::SINGLE_TAP, config.pin)?;
        self.apply_rate_floor(OutputDataRate::with_tap_floor)?;

        self.device.int_config_1().modify(|w| {
            w.set_s_tap_int_en(config.single_tap);
            w.set_d_tap_int_en(config.double_tap);
        })?;

        self.device.tap_config().write(|w| {
            w.set_tap_sensitivity(config.sensitivity as u8);
            w.set_sel_axis(config.axis as u8);
        })?;
        self.device.tap_config_1().write(|w| {
            w.set_tics_th(config.peak_to_peak as u8);
            w.set_quiet(config.quiet as u8);
            w.set_quiet_dt(config.double_tap_window.bits());
        })?;
        Ok(())
    }

    // ==================== ORIENTATION CHANGE ====================

    /// Configure the orientation change interrupt with raw register values
    ///
    /// When `config.enable` is false only the enable bit is cleared.
    ///
    /// # Arguments
    /// * `config` - Orientation change configuration
    /// * `threshold` - Threshold in 8 mg steps
    /// * `duration` - Stability duration in 10 ms steps
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn configure_orientation_change_interrupt_raw(
        &mut self,
        config: &OrientationConfig,
        threshold: u8,
        duration: u8,
    ) -> Result<(), Error<I::Error>> {
        if !config.enable {
            self.device.int_config_0().modify(|w| {
                w.set_orientch_int_en(false);
            })?;
            return Ok(());
        }

        self.device.int_config_0().modify(|w| {
            w.set_orientch_int_en(true);
        })?;
        self.link_to_interrupt_pin(InterruptSource::ORIENTATION_CHANGE, config.pin)?;

        self.device.orientch_config_0().write(|w| {
            w.set_orient_refu(config.reference_update as u8);
            w.set_orient_data_src(config.data_source == OrientationDataSource::AccFiltLp);
            w.set_orient_x_en(config.x_axis);
            w.set_orient_y_en(config.y_axis);
            w.set_orient_z_en(config.z_axis);
        })?;
        self.device.orientch_config_1().write(|w| {
            w.set_orient_thres(threshold);
        })?;
        self.device.orientch_config_3().write(|w| {
            w.set_orient_dur(duration);
        })?;
        Ok(())
    }

    /// Configure the orientation change interrupt with physical values
    ///
    /// Threshold and duration are truncated to 8 mg and 10 ms steps and
    /// saturate at 255 steps.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn configure_orientation_change_interrupt(
        &mut self,
        config: &OrientationConfig,
        threshold_mg: f32,
        duration_ms: f32,
    ) -> Result<(), Error<I::Error>> {
        self.configure_orientation_change_interrupt_raw(
            config,
            threshold_from_mg(threshold_mg),
            orientation_duration_from_ms(duration_ms),
        )
    }

    /// Write the orientation reference vector
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails, or
    /// `InvalidConfig` if any axis is outside -2048..=2047.
    pub fn set_orientation_reference(&mut self, reference: &AccelData) -> Result<(), Error<I::Error>> {
        let bytes = reference.to_le_bytes_checked().ok_or(Error::InvalidConfig)?;
        self.write_reference(registers::ORIENTCH_REFERENCE_START, bytes)
    }

    /// Use the current acceleration sample as the orientation reference
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn snapshot_orientation_reference(&mut self) -> Result<(), Error<I::Error>> {
        let sample = self.read_acceleration_bytes()?;
        self.write_reference(registers::ORIENTCH_REFERENCE_START, sample)
    }

    // ==================== STEP COUNTER ====================

    /// Enable or disable the step detector interrupt and counter
    ///
    /// Disabling clears the enable bit and leaves routing untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn configure_step_detector_counter(
        &mut self,
        enable: bool,
        pin: InterruptPin,
    ) -> Result<(), Error<I::Error>> {
        self.device.int_config_1().modify(|w| {
            w.set_step_int_en(enable);
        })?;
        if enable {
            self.link_to_interrupt_pin(InterruptSource::STEP_DETECTOR, pin)?;
        }
        Ok(())
    }

    /// Read the number of steps counted so far
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_total_steps(&mut self) -> Result<u32, Error<I::Error>> {
        let mut buffer = [0u8; 3];
        self.device
            .interface
            .read_register(registers::STEP_CNT_START, 24, &mut buffer)?;
        Ok(u32::from_le_bytes([buffer[0], buffer[1], buffer[2], 0]))
    }

    /// Clear the step counter
    ///
    /// Returns `Ok(false)` if the command decoder was busy and nothing was sent.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn reset_step_counter(&mut self) -> Result<bool, Error<I::Error>> {
        self.execute_command(Command::StepCounterClear)
    }

    /// Consume the driver and return the underlying interface
    pub fn release(self) -> I {
        self.device.interface
    }

    /// Get a reference to the underlying register device (for advanced usage)
    pub const fn device(&self) -> &RegisterDevice<I> {
        &self.device
    }
}

const fn generic_reference_start(interrupt: GenericInterrupt) -> u8 {
    match interrupt {
        GenericInterrupt::One => registers::GEN1INT_REFERENCE_START,
        GenericInterrupt::Two => registers::GEN2INT_REFERENCE_START,
    }
}

impl<I2C> Bma400Driver<I2cInterface<I2C>>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Find the BMA400 on the bus, trying the primary then the secondary address
    ///
    /// An address that does not acknowledge counts as "not found". If
    /// neither address holds a BMA400 the interface stays bound to the
    /// secondary address and `Ok(false)` is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the bus fails for any reason other than a
    /// missing acknowledge.
    pub fn init_with_address_probe(&mut self) -> Result<bool, Error<I2C::Error>> {
        for address in [BMA400_ADDRESS_PRIMARY, BMA400_ADDRESS_SECONDARY] {
            if self.probe_address(address)? {
                #[cfg(feature = "defmt")]
                defmt::debug!("BMA400 found at {=u8:#x}", address);
                return Ok(true);
            }
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("No BMA400 found at either address");
        Ok(false)
    }

    /// The I2C address the driver is bound to
    pub const fn address(&self) -> u8 {
        self.device.interface.address()
    }

    fn probe_address(&mut self, address: u8) -> Result<bool, Error<I2C::Error>> {
        use embedded_hal::i2c::{Error as _, ErrorKind};

        self.device.interface.set_address(address);
        match self.device.chip_id().read() {
            Ok(reg) => Ok(reg.chip_id() == CHIP_ID_VALUE),
            Err(e) if matches!(e.kind(), ErrorKind::NoAcknowledge(_)) => Ok(false),
            Err(e) => Err(Error::Bus(e)),
        }
    }
}
