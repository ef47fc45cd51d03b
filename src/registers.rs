//! Register definitions for the BMA400
//!
//! The BMA400 has a flat, single-page register map with one-byte addresses.
//! Every configuration register is described here with its bit fields so the
//! driver only ever touches registers through generated field accessors.
//!
//! Multi-byte blocks that are read or written as a burst (acceleration data,
//! interrupt status, step count, reference vectors) are described by their
//! start address in the constants below and accessed through the raw
//! interface.

/// First byte of the acceleration data block (`ACC_X_LSB`, 6 bytes)
pub const ACC_DATA_START: u8 = 0x04;

/// First byte of the interrupt status block (`INT_STAT0`, 3 bytes)
pub const INT_STAT_START: u8 = 0x0E;

/// First byte of the step counter block (`STEP_CNT_0`, 3 bytes, little-endian)
pub const STEP_CNT_START: u8 = 0x15;

/// First byte of the orientation reference vector (`ORIENTCH_CONFIG4`, 6 bytes)
pub const ORIENTCH_REFERENCE_START: u8 = 0x39;

/// First byte of the generic interrupt 1 reference vector (`GEN1INT_CONFIG4`, 6 bytes)
pub const GEN1INT_REFERENCE_START: u8 = 0x44;

/// First byte of the generic interrupt 2 reference vector (`GEN2INT_CONFIG4`, 6 bytes)
pub const GEN2INT_REFERENCE_START: u8 = 0x4F;

device_driver::create_device!(
    device_name: Bma400,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = LE;
        }

        // ==================== IDENTIFICATION & STATUS ====================

        /// CHIP_ID - Chip identification (0x00)
        /// Expected value: 0x90
        register ChipId {
            const ADDRESS = 0x00;
            const SIZE_BITS = 8;

            /// Chip ID (should read 0x90)
            chip_id: uint = 0..8,
        },

        /// STATUS - Sensor status flags (0x03)
        register Status {
            const ADDRESS = 0x03;
            const SIZE_BITS = 8;

            /// At least one interrupt is active
            int_active: bool = 0,
            /// Current power mode (0=sleep, 1=low power, 2=normal)
            power_mode_stat: uint = 1..3,
            reserved_3: uint = 3..4,
            /// Command decoder is ready to accept a new command
            cmd_rdy: bool = 4,
            reserved_6_5: uint = 5..7,
            /// New acceleration data is available
            drdy_stat: bool = 7,
        },

        // ==================== ACCELEROMETER CONFIGURATION ====================

        /// ACC_CONFIG0 - Power mode and low-power oversampling (0x19)
        register AccConfig0 {
            const ADDRESS = 0x19;
            const SIZE_BITS = 8;

            /// Power mode selector (0=sleep, 1=low power, 2=normal, 3=reserved)
            power_mode_conf: uint = 0..2,
            reserved_4_2: uint = 2..5,
            /// Oversampling ratio used in low-power mode
            osr_lp: uint = 5..7,
            /// Filter 1 bandwidth (false=0.48x ODR, true=0.24x ODR)
            filt_1_bw: bool = 7,
        },

        /// ACC_CONFIG1 - Output data rate, oversampling and range (0x1A)
        register AccConfig1 {
            const ADDRESS = 0x1A;
            const SIZE_BITS = 8;

            /// Output data rate code (0x05=12.5 Hz .. 0x0B=800 Hz)
            acc_odr: uint = 0..4,
            /// Oversampling ratio used in normal mode
            osr: uint = 4..6,
            /// Measurement range (0=2g, 1=4g, 2=8g, 3=16g)
            acc_range: uint = 6..8,
        },

        /// ACC_CONFIG2 - Data register source select (0x1B)
        register AccConfig2 {
            const ADDRESS = 0x1B;
            const SIZE_BITS = 8;

            reserved_1_0: uint = 0..2,
            /// Data source (0=filter 1, 1=filter 2, 2=filter 2 + 1 Hz low-pass)
            data_src_reg: uint = 2..4,
            reserved_7_4: uint = 4..8,
        },

        // ==================== INTERRUPT ENABLES ====================

        /// INT_CONFIG0 - Interrupt enable 0 (0x1F)
        register IntConfig0 {
            const ADDRESS = 0x1F;
            const SIZE_BITS = 8;

            reserved_0: uint = 0..1,
            /// Orientation change interrupt enable
            orientch_int_en: bool = 1,
            /// Generic interrupt 1 enable
            gen_1_int_en: bool = 2,
            /// Generic interrupt 2 enable
            gen_2_int_en: bool = 3,
            reserved_4: uint = 4..5,
            /// FIFO full interrupt enable
            ffull_int_en: bool = 5,
            /// FIFO watermark interrupt enable
            fwm_int_en: bool = 6,
            /// Data ready interrupt enable
            drdy_int_en: bool = 7,
        },

        /// INT_CONFIG1 - Interrupt enable 1 and latch mode (0x20)
        register IntConfig1 {
            const ADDRESS = 0x20;
            const SIZE_BITS = 8;

            /// Step detector/counter interrupt enable
            step_int_en: bool = 0,
            reserved_1: uint = 1..2,
            /// Single tap interrupt enable
            s_tap_int_en: bool = 2,
            /// Double tap interrupt enable
            d_tap_int_en: bool = 3,
            /// Activity change interrupt enable
            actch_int_en: bool = 4,
            reserved_6_5: uint = 5..7,
            /// Latched interrupt mode
            latch_int: bool = 7,
        },

        // ==================== INTERRUPT ROUTING ====================

        /// INT1_MAP - Interrupt routing to INT1 (0x21)
        register Int1Map {
            const ADDRESS = 0x21;
            const SIZE_BITS = 8;

            wkup_int_1: bool = 0,
            orientch_int_1: bool = 1,
            gen_1_int_1: bool = 2,
            gen_2_int_1: bool = 3,
            ieng_overrun_int_1: bool = 4,
            ffull_int_1: bool = 5,
            fwm_int_1: bool = 6,
            drdy_int_1: bool = 7,
        },

        /// INT2_MAP - Interrupt routing to INT2 (0x22)
        register Int2Map {
            const ADDRESS = 0x22;
            const SIZE_BITS = 8;

            wkup_int_2: bool = 0,
            orientch_int_2: bool = 1,
            gen_1_int_2: bool = 2,
            gen_2_int_2: bool = 3,
            ieng_overrun_int_2: bool = 4,
            ffull_int_2: bool = 5,
            fwm_int_2: bool = 6,
            drdy_int_2: bool = 7,
        },

        /// INT12_MAP - Feature engine interrupt routing to INT1/INT2 (0x23)
        register Int12Map {
            const ADDRESS = 0x23;
            const SIZE_BITS = 8;

            step_int_1: bool = 0,
            reserved_1: uint = 1..2,
            tap_int_1: bool = 2,
            actch_int_1: bool = 3,
            step_int_2: bool = 4,
            reserved_5: uint = 5..6,
            tap_int_2: bool = 6,
            actch_int_2: bool = 7,
        },

        /// INT12_IO_CTRL - Interrupt pin electrical behaviour (0x24)
        register Int12IoCtrl {
            const ADDRESS = 0x24;
            const SIZE_BITS = 8;

            reserved_0: uint = 0..1,
            /// INT1 active level (true=active high)
            int_1_lvl: bool = 1,
            /// INT1 open drain
            int_1_od: bool = 2,
            reserved_4_3: uint = 3..5,
            /// INT2 active level (true=active high)
            int_2_lvl: bool = 5,
            /// INT2 open drain
            int_2_od: bool = 6,
            reserved_7: uint = 7..8,
        },

        // ==================== AUTO LOW-POWER ====================

        /// AUTOLOWPOW_0 - Auto low-power timeout threshold MSBs (0x2A)
        register AutoLowPow0 {
            const ADDRESS = 0x2A;
            const SIZE_BITS = 8;

            /// Timeout threshold bits 11..4 (2.5 ms/LSB)
            auto_lp_timeout_thres_msb: uint = 0..8,
        },

        /// AUTOLOWPOW_1 - Auto low-power triggers and timeout LSBs (0x2B)
        register AutoLowPow1 {
            const ADDRESS = 0x2B;
            const SIZE_BITS = 8;

            /// Enter low power when a data ready event occurs
            drdy_lowpow_trig: bool = 0,
            /// Enter low power on generic interrupt 1
            gen_1_int: bool = 1,
            /// Timeout mode (0=off, 1=timeout, 2=timeout reset by gen2 interrupt)
            auto_lp_timeout: uint = 2..4,
            /// Timeout threshold bits 3..0
            auto_lp_timeout_thres_lsb: uint = 4..8,
        },

        // ==================== ORIENTATION CHANGE ====================

        /// ORIENTCH_CONFIG0 - Orientation change detector setup (0x35)
        register OrientchConfig0 {
            const ADDRESS = 0x35;
            const SIZE_BITS = 8;

            reserved_1_0: uint = 0..2,
            /// Reference update mode (0=manual, 1=acc_filt2, 2=acc_filt_lp)
            orient_refu: uint = 2..4,
            /// Data source (false=acc_filt2, true=acc_filt_lp)
            orient_data_src: bool = 4,
            orient_x_en: bool = 5,
            orient_y_en: bool = 6,
            orient_z_en: bool = 7,
        },

        /// ORIENTCH_CONFIG1 - Orientation change threshold (0x36)
        register OrientchConfig1 {
            const ADDRESS = 0x36;
            const SIZE_BITS = 8;

            /// Threshold (8 mg/LSB)
            orient_thres: uint = 0..8,
        },

        /// ORIENTCH_CONFIG3 - Orientation change stability duration (0x38)
        register OrientchConfig3 {
            const ADDRESS = 0x38;
            const SIZE_BITS = 8;

            /// Duration (10 ms/LSB)
            orient_dur: uint = 0..8,
        },

        // ==================== GENERIC INTERRUPT 1 ====================

        /// GEN1INT_CONFIG0 - Generic interrupt 1 setup (0x3F)
        register Gen1IntConfig0 {
            const ADDRESS = 0x3F;
            const SIZE_BITS = 8;

            /// Hysteresis (0=none, 1=24 mg, 2=48 mg, 3=96 mg)
            act_hyst: uint = 0..2,
            /// Reference update mode
            act_refu: uint = 2..4,
            /// Data source (false=acc_filt1, true=acc_filt2)
            data_src: bool = 4,
            act_x_en: bool = 5,
            act_y_en: bool = 6,
            act_z_en: bool = 7,
        },

        /// GEN1INT_CONFIG1 - Generic interrupt 1 criterion (0x40)
        register Gen1IntConfig1 {
            const ADDRESS = 0x40;
            const SIZE_BITS = 8;

            /// Combine axes with AND (true) or OR (false)
            comb_sel: bool = 0,
            /// Activity (true) or inactivity (false) detection
            criterion_sel: bool = 1,
            reserved_7_2: uint = 2..8,
        },

        /// GEN1INT_CONFIG2 - Generic interrupt 1 threshold (0x41)
        register Gen1IntConfig2 {
            const ADDRESS = 0x41;
            const SIZE_BITS = 8;

            /// Threshold (8 mg/LSB)
            threshold: uint = 0..8,
        },

        /// GEN1INT_CONFIG3 - Generic interrupt 1 duration MSB (0x42)
        register Gen1IntConfig3 {
            const ADDRESS = 0x42;
            const SIZE_BITS = 8;

            duration_msb: uint = 0..8,
        },

        /// GEN1INT_CONFIG31 - Generic interrupt 1 duration LSB (0x43)
        register Gen1IntConfig31 {
            const ADDRESS = 0x43;
            const SIZE_BITS = 8;

            duration_lsb: uint = 0..8,
        },

        // ==================== GENERIC INTERRUPT 2 ====================

        /// GEN2INT_CONFIG0 - Generic interrupt 2 setup (0x4A)
        register Gen2IntConfig0 {
            const ADDRESS = 0x4A;
            const SIZE_BITS = 8;

            act_hyst: uint = 0..2,
            act_refu: uint = 2..4,
            data_src: bool = 4,
            act_x_en: bool = 5,
            act_y_en: bool = 6,
            act_z_en: bool = 7,
        },

        /// GEN2INT_CONFIG1 - Generic interrupt 2 criterion (0x4B)
        register Gen2IntConfig1 {
            const ADDRESS = 0x4B;
            const SIZE_BITS = 8;

            comb_sel: bool = 0,
            criterion_sel: bool = 1,
            reserved_7_2: uint = 2..8,
        },

        /// GEN2INT_CONFIG2 - Generic interrupt 2 threshold (0x4C)
        register Gen2IntConfig2 {
            const ADDRESS = 0x4C;
            const SIZE_BITS = 8;

            threshold: uint = 0..8,
        },

        /// GEN2INT_CONFIG3 - Generic interrupt 2 duration MSB (0x4D)
        register Gen2IntConfig3 {
            const ADDRESS = 0x4D;
            const SIZE_BITS = 8;

            duration_msb: uint = 0..8,
        },

        /// GEN2INT_CONFIG31 - Generic interrupt 2 duration LSB (0x4E)
        register Gen2IntConfig31 {
            const ADDRESS = 0x4E;
            const SIZE_BITS = 8;

            duration_lsb: uint = 0..8,
        },

        // ==================== ACTIVITY CHANGE ====================

        /// ACTCH_CONFIG0 - Activity change threshold (0x55)
        register ActchConfig0 {
            const ADDRESS = 0x55;
            const SIZE_BITS = 8;

            /// Threshold (8 mg/LSB)
            actch_thres: uint = 0..8,
        },

        /// ACTCH_CONFIG1 - Activity change setup (0x56)
        register ActchConfig1 {
            const ADDRESS = 0x56;
            const SIZE_BITS = 8;

            /// Observation window (0=32 .. 4=512 samples)
            actch_npts: uint = 0..4,
            /// Data source (false=acc_filt1, true=acc_filt2)
            actch_data_src: bool = 4,
            actch_x_en: bool = 5,
            actch_y_en: bool = 6,
            actch_z_en: bool = 7,
        },

        // ==================== TAP DETECTION ====================

        /// TAP_CONFIG - Tap sensitivity and axis (0x57)
        register TapConfig {
            const ADDRESS = 0x57;
            const SIZE_BITS = 8;

            /// Sensitivity (0=highest .. 7=lowest)
            tap_sensitivity: uint = 0..3,
            /// Evaluation axis (0=Z, 1=Y, 2=X)
            sel_axis: uint = 3..5,
            reserved_7_5: uint = 5..8,
        },

        /// TAP_CONFIG1 - Tap timing (0x58)
        register TapConfig1 {
            const ADDRESS = 0x58;
            const SIZE_BITS = 8;

            /// Maximum peak-to-peak duration (6/9/12/18 samples)
            tics_th: uint = 0..2,
            /// Minimum quiet time between taps (60/80/100/120 samples)
            quiet: uint = 2..4,
            /// Double tap window
            quiet_dt: uint = 4..6,
            reserved_7_6: uint = 6..8,
        },

        // ==================== COMMAND ====================

        /// CMD - Command register (0x7E)
        register Cmd {
            const ADDRESS = 0x7E;
            const SIZE_BITS = 8;

            /// Command code (0xB1=step counter clear, 0xB6=soft reset)
            cmd: uint = 0..8,
        }
    }
);
