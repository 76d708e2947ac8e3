//! V4L2 thermal camera source.
//!
//! Locates the camera by its USB vendor/product pair via sysfs, opens the
//! matching video4linux node with a memory-mapped capture stream, and
//! reconstructs pseudo-16-bit radiometric samples from the raw byte stream.
//! Also owns the USB-level reset used for fault recovery: the usbfs
//! `USBDEVFS_RESET` ioctl forces the device to disconnect and re-enumerate.

use std::fs;
use std::os::fd::AsRawFd;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ouroboros::self_referencing;
use tracing::{info, warn};
use v4l::io::traits::CaptureStream;

use crate::thermal_pipeline::capture::source::FrameSource;
use crate::thermal_pipeline::capture::types::{RawFrame, SENSOR_HEIGHT, SENSOR_WIDTH};
use crate::thermal_pipeline::common::error::{Result, ThermalError};

/// usbfs ioctl request that resets a USB device.
const USBDEVFS_RESET: libc::c_ulong = 0x5514;

/// Settle time after a USB reset before the device is expected back.
const RESET_SETTLE: Duration = Duration::from_secs(2);

/// How many times to poll sysfs for the device to re-enumerate after a reset.
const REENUMERATION_ATTEMPTS: u32 = 5;

/// Delay between re-enumeration polls.
const REENUMERATION_DELAY: Duration = Duration::from_secs(1);

/// Number of mmap buffers for the capture stream.
const STREAM_BUFFERS: u32 = 4;

#[self_referencing]
struct CaptureState {
    device: v4l::Device,
    #[borrows(mut device)]
    #[covariant]
    stream: v4l::prelude::MmapStream<'this, v4l::Device>,
}

/// Thermal camera opened through the video4linux subsystem.
pub struct V4l2ThermalSource {
    vid: u16,
    pid: u16,
    index: u32,
    state: Option<CaptureState>,
}

impl V4l2ThermalSource {
    /// Opens the camera identified by the given USB vendor/product pair.
    ///
    /// Fails with `DeviceNotFound` when no video4linux node belongs to a
    /// matching USB device.
    pub fn open(vid: u16, pid: u16) -> Result<Self> {
        let Some(index) = find_video_index(vid, pid)? else {
            return Err(ThermalError::DeviceNotFound { vid, pid });
        };

        let mut source = Self {
            vid,
            pid,
            index,
            state: None,
        };
        source.open_stream()?;
        Ok(source)
    }

    fn open_stream(&mut self) -> Result<()> {
        use v4l::video::Capture;

        let path = format!("/dev/video{}", self.index);
        let device = v4l::Device::with_path(&path)
            .map_err(|e| ThermalError::ReadFailed(format!("open {path}: {e}")))?;

        // Request the native raw mode. Some UVC gadgets refuse set_format
        // for the mode they already stream; keep whatever is active then.
        let mut format = device
            .format()
            .map_err(|e| ThermalError::ReadFailed(format!("query format on {path}: {e}")))?;
        format.width = SENSOR_WIDTH as u32;
        format.height = SENSOR_HEIGHT as u32;
        format.fourcc = v4l::FourCC::new(b"YUYV");
        if let Err(err) = device.set_format(&format) {
            warn!("failed to set {SENSOR_WIDTH}x{SENSOR_HEIGHT} YUYV on {path}: {err}");
        }

        let state = CaptureStateTryBuilder {
            device,
            stream_builder: |device| {
                v4l::prelude::MmapStream::with_buffers(
                    device,
                    v4l::buffer::Type::VideoCapture,
                    STREAM_BUFFERS,
                )
            },
        }
        .try_build()
        .map_err(|e| ThermalError::ReadFailed(format!("create capture stream on {path}: {e}")))?;

        self.state = Some(state);
        info!(
            "opened thermal camera {:04x}:{:04x} at {path}",
            self.vid, self.pid
        );
        Ok(())
    }
}

impl FrameSource for V4l2ThermalSource {
    fn read_frame(&mut self) -> Result<RawFrame> {
        let state = self
            .state
            .as_mut()
            .ok_or_else(|| ThermalError::ReadFailed("capture stream not open".into()))?;

        let bytes = state
            .with_mut(|fields| fields.stream.next().map(|(buf, _meta)| buf.to_vec()))
            .map_err(|e| ThermalError::ReadFailed(e.to_string()))?;

        RawFrame::from_interleaved_bytes(SENSOR_WIDTH, SENSOR_HEIGHT, &bytes)
    }

    fn reset_and_reopen(&mut self) -> Result<()> {
        // Drop the stream before yanking the device out from under it.
        self.state = None;

        usb_reset(self.vid, self.pid)?;
        std::thread::sleep(RESET_SETTLE);

        for attempt in 1..=REENUMERATION_ATTEMPTS {
            if let Some(index) = find_video_index(self.vid, self.pid)? {
                self.index = index;
                return self.open_stream();
            }
            info!("waiting for device to re-enumerate ({attempt}/{REENUMERATION_ATTEMPTS})");
            std::thread::sleep(REENUMERATION_DELAY);
        }

        Err(ThermalError::ResetFailed(format!(
            "device {:04x}:{:04x} did not re-enumerate",
            self.vid, self.pid
        )))
    }

    fn describe(&self) -> String {
        format!(
            "thermal camera {:04x}:{:04x} (/dev/video{})",
            self.vid, self.pid, self.index
        )
    }
}

/// Finds the lowest video4linux index whose backing USB device matches the
/// vendor/product pair, by parsing the `PRODUCT=` line of `device/uevent`.
fn find_video_index(vid: u16, pid: u16) -> Result<Option<u32>> {
    let mut indices: Vec<u32> = Vec::new();

    let entries = match fs::read_dir("/sys/class/video4linux") {
        Ok(entries) => entries,
        // No V4L2 subsystem at all counts as "no device", not an I/O fault.
        Err(_) => return Ok(None),
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(index) = name.strip_prefix("video").and_then(|s| s.parse::<u32>().ok()) else {
            continue;
        };

        let Ok(uevent) = fs::read_to_string(path.join("device/uevent")) else {
            continue;
        };
        if uevent_matches(&uevent, vid, pid) {
            indices.push(index);
        }
    }

    indices.sort_unstable();
    Ok(indices.first().copied())
}

/// Checks a uevent `PRODUCT=vid/pid/rev` line (unpadded hex) against the pair.
fn uevent_matches(uevent: &str, vid: u16, pid: u16) -> bool {
    for line in uevent.lines() {
        let Some(product) = line.strip_prefix("PRODUCT=") else {
            continue;
        };
        let mut parts = product.split('/');
        let file_vid = parts.next().and_then(|s| u16::from_str_radix(s, 16).ok());
        let file_pid = parts.next().and_then(|s| u16::from_str_radix(s, 16).ok());
        return file_vid == Some(vid) && file_pid == Some(pid);
    }
    false
}

/// Issues a USB-level reset of the matching physical device.
///
/// Walks `/sys/bus/usb/devices` for the vendor/product pair, resolves the
/// usbfs node from `busnum`/`devnum`, and fires `USBDEVFS_RESET` at it.
fn usb_reset(vid: u16, pid: u16) -> Result<()> {
    let entries = fs::read_dir("/sys/bus/usb/devices")
        .map_err(|e| ThermalError::ResetFailed(format!("walk usb sysfs: {e}")))?;

    for entry in entries.flatten() {
        let devdir = entry.path();
        if read_hex_attr(&devdir, "idVendor") != Some(vid)
            || read_hex_attr(&devdir, "idProduct") != Some(pid)
        {
            continue;
        }

        let (Some(busnum), Some(devnum)) = (
            read_dec_attr(&devdir, "busnum"),
            read_dec_attr(&devdir, "devnum"),
        ) else {
            continue;
        };

        let usbfs = PathBuf::from(format!("/dev/bus/usb/{busnum:03}/{devnum:03}"));
        info!("resetting USB device at {}", usbfs.display());

        let file = fs::OpenOptions::new()
            .write(true)
            .open(&usbfs)
            .map_err(|e| ThermalError::ResetFailed(format!("open {}: {e}", usbfs.display())))?;

        // SAFETY: the fd is valid for the lifetime of `file` and
        // USBDEVFS_RESET takes no argument payload.
        let rc = unsafe { libc::ioctl(file.as_raw_fd(), USBDEVFS_RESET, 0) };
        if rc < 0 {
            return Err(ThermalError::ResetFailed(
                std::io::Error::last_os_error().to_string(),
            ));
        }
        return Ok(());
    }

    Err(ThermalError::ResetFailed(format!(
        "no USB device {vid:04x}:{pid:04x} to reset"
    )))
}

fn read_hex_attr(dir: &Path, attr: &str) -> Option<u16> {
    let text = fs::read_to_string(dir.join(attr)).ok()?;
    u16::from_str_radix(text.trim(), 16).ok()
}

fn read_dec_attr(dir: &Path, attr: &str) -> Option<u32> {
    let text = fs::read_to_string(dir.join(attr)).ok()?;
    text.trim().parse().ok()
}
