use std::ffi::c_void;
use std::ptr;

use accessibility_sys::{
    AXError, AXUIElementCopyAttributeValue, AXUIElementCreateApplication, AXUIElementRef,
    AXUIElementSetAttributeValue, AXUIElementSetMessagingTimeout, AXValueCreate, AXValueGetTypeID,
    AXValueGetValue, AXValueRef, AXValueType, kAXErrorSuccess, kAXPositionAttribute, kAXSizeAttribute,
    kAXTitleAttribute, kAXValueTypeCGPoint, kAXValueTypeCGSize, kAXWindowsAttribute,
};
use core_foundation::array::{CFArray, CFArrayRef};
use core_foundation::base::{CFType, CFTypeRef, TCFType};
use core_foundation::dictionary::{CFDictionary, CFDictionaryRef};
use core_foundation::number::CFNumber;
use core_foundation::string::{CFString, CFStringRef};
use core_graphics::geometry::{CGPoint, CGSize};
use core_graphics::window::{
    copy_window_info, kCGNullWindowID, kCGWindowBounds, kCGWindowLayer,
    kCGWindowListOptionOnScreenOnly, kCGWindowName, kCGWindowNumber, kCGWindowOwnerName,
    kCGWindowOwnerPID,
};
use tracing::{debug, info, warn};

use super::errors::WindowError;
use super::traits::{WindowHandle, WindowSource};
use super::types::ScreenWindow;
use crate::geometry::{Point, Rect, Size};

/// Timeout for AX messaging (seconds)
const AX_MESSAGING_TIMEOUT: f32 = 1.0;

// SAFETY: FFI declaration for AXIsProcessTrusted from macOS ApplicationServices framework.
// Returns false when the process lacks accessibility permissions (does not crash).
#[link(name = "ApplicationServices", kind = "framework")]
unsafe extern "C" {
    fn AXIsProcessTrusted() -> bool;
}

/// Check if the current process has accessibility permissions
fn check_accessibility_permission() -> Result<(), WindowError> {
    let trusted = unsafe { AXIsProcessTrusted() };
    if !trusted {
        return Err(WindowError::AccessibilityPermissionDenied);
    }
    Ok(())
}

/// Window source backed by the CoreGraphics window list (coarse view) and
/// the Accessibility API (controllable windows).
#[derive(Debug)]
pub struct MacWindowSource {
    _private: (),
}

impl MacWindowSource {
    /// Create the source, failing early when accessibility access is missing.
    pub fn new() -> Result<Self, WindowError> {
        check_accessibility_permission()?;
        info!(event = "core.window.backend_ready", backend = "macos");
        Ok(Self { _private: () })
    }
}

impl WindowSource for MacWindowSource {
    type Handle = AxWindow;

    fn list_on_screen_windows(&self) -> Result<Vec<ScreenWindow>, WindowError> {
        debug!(event = "core.window.list_started");

        let entries = copy_window_info(kCGWindowListOptionOnScreenOnly, kCGNullWindowID).ok_or(
            WindowError::EnumerationFailed {
                message: "CGWindowListCopyWindowInfo returned no window list".to_string(),
            },
        )?;

        let keys = WindowListKeys::new();
        let windows: Vec<ScreenWindow> = entries
            .iter()
            .map(|raw| {
                // SAFETY: every element of the window info array is a CFDictionary
                // owned by the array; get rule retains it for the wrapper's lifetime.
                let dict: CFDictionary<CFString, CFType> =
                    unsafe { CFDictionary::wrap_under_get_rule(*raw as CFDictionaryRef) };
                keys.read_entry(&dict)
            })
            .collect();

        debug!(event = "core.window.list_completed", count = windows.len());
        Ok(windows)
    }

    fn list_controllable_windows(&self, pid: i32) -> Result<Vec<AxWindow>, WindowError> {
        // SAFETY: AXUIElementCreateApplication creates a +1 retained AXUIElementRef.
        let app_element = unsafe { AXUIElementCreateApplication(pid) };
        if app_element.is_null() {
            return Err(WindowError::ControllableWindowsUnavailable {
                pid,
                message: "failed to create AX application element".to_string(),
            });
        }
        // SAFETY: Create Rule, the wrapper takes ownership and releases on drop.
        let app = unsafe { CFType::wrap_under_create_rule(app_element as CFTypeRef) };

        // SAFETY: app_element is valid while `app` is alive.
        unsafe {
            AXUIElementSetMessagingTimeout(app_element, AX_MESSAGING_TIMEOUT);
        }

        let windows_value = copy_attribute(app_element, kAXWindowsAttribute).map_err(|code| {
            WindowError::ControllableWindowsUnavailable {
                pid,
                message: format!("AXError {}", code),
            }
        })?;
        drop(app);

        if windows_value.type_of() != CFArray::<CFType>::type_id() {
            return Err(WindowError::ControllableWindowsUnavailable {
                pid,
                message: "windows attribute is not an array".to_string(),
            });
        }

        // SAFETY: type checked above; get rule retains, `windows_value` still owns its +1.
        let cf_array: CFArray<CFType> =
            unsafe { CFArray::wrap_under_get_rule(windows_value.as_CFTypeRef() as CFArrayRef) };

        let windows: Vec<AxWindow> = cf_array
            .iter()
            .map(|item| AxWindow {
                element: CFType::clone(&item),
                pid,
            })
            .collect();

        debug!(
            event = "core.window.ax_list_completed",
            pid = pid,
            count = windows.len()
        );
        Ok(windows)
    }
}

/// A window element from the Accessibility API. Retained for its lifetime.
#[derive(Debug)]
pub struct AxWindow {
    element: CFType,
    pid: i32,
}

impl AxWindow {
    fn as_element(&self) -> AXUIElementRef {
        self.element.as_CFTypeRef() as AXUIElementRef
    }

    pub fn pid(&self) -> i32 {
        self.pid
    }
}

impl WindowHandle for AxWindow {
    fn title(&self) -> Option<String> {
        let value = copy_attribute(self.as_element(), kAXTitleAttribute).ok()?;
        value.downcast::<CFString>().map(|s| s.to_string())
    }

    fn position(&self) -> Result<Point, WindowError> {
        let mut point = CGPoint::new(0.0, 0.0);
        read_ax_value(
            self.as_element(),
            kAXPositionAttribute,
            "position",
            kAXValueTypeCGPoint,
            &mut point as *mut CGPoint as *mut c_void,
        )?;
        Ok(Point::new(point.x, point.y))
    }

    fn size(&self) -> Result<Size, WindowError> {
        let mut size = CGSize::new(0.0, 0.0);
        read_ax_value(
            self.as_element(),
            kAXSizeAttribute,
            "size",
            kAXValueTypeCGSize,
            &mut size as *mut CGSize as *mut c_void,
        )?;
        Ok(Size::new(size.width, size.height))
    }

    fn set_position(&self, position: Point) -> Result<(), WindowError> {
        let point = CGPoint::new(position.x, position.y);
        write_ax_value(
            self.as_element(),
            kAXPositionAttribute,
            "position",
            kAXValueTypeCGPoint,
            &point as *const CGPoint as *const c_void,
        )
    }

    fn set_size(&self, size: Size) -> Result<(), WindowError> {
        let cg_size = CGSize::new(size.width, size.height);
        write_ax_value(
            self.as_element(),
            kAXSizeAttribute,
            "size",
            kAXValueTypeCGSize,
            &cg_size as *const CGSize as *const c_void,
        )
    }
}

/// Copy an attribute value, taking ownership of the returned reference.
fn copy_attribute(element: AXUIElementRef, attribute: &str) -> Result<CFType, AXError> {
    let cf_attr = CFString::new(attribute);
    let mut value: CFTypeRef = ptr::null();

    // SAFETY: Standard AXUIElementCopyAttributeValue call (Copy Rule: +1 retained ref).
    let result = unsafe {
        AXUIElementCopyAttributeValue(element, cf_attr.as_concrete_TypeRef(), &mut value)
    };

    if result != kAXErrorSuccess || value.is_null() {
        return Err(result);
    }

    // SAFETY: value is a +1 retained reference we now own.
    Ok(unsafe { CFType::wrap_under_create_rule(value) })
}

fn read_ax_value(
    element: AXUIElementRef,
    attribute: &str,
    label: &'static str,
    value_type: AXValueType,
    out: *mut c_void,
) -> Result<(), WindowError> {
    let value = copy_attribute(element, attribute).map_err(|code| {
        WindowError::AttributeReadFailed {
            attribute: label,
            message: format!("AXError {}", code),
        }
    })?;

    // SAFETY: AXValueGetTypeID has no preconditions.
    if value.type_of() != unsafe { AXValueGetTypeID() } {
        return Err(WindowError::AttributeReadFailed {
            attribute: label,
            message: "attribute is not an AXValue".to_string(),
        });
    }

    // SAFETY: value is an AXValue (checked above) and `out` points to storage
    // of the struct matching `value_type`.
    let ok = unsafe { AXValueGetValue(value.as_CFTypeRef() as AXValueRef, value_type, out) };
    if !ok {
        return Err(WindowError::AttributeReadFailed {
            attribute: label,
            message: "AXValue holds a different value type".to_string(),
        });
    }
    Ok(())
}

fn write_ax_value(
    element: AXUIElementRef,
    attribute: &str,
    label: &'static str,
    value_type: AXValueType,
    input: *const c_void,
) -> Result<(), WindowError> {
    // SAFETY: `input` points to a struct matching `value_type`; Create Rule.
    let raw = unsafe { AXValueCreate(value_type, input) };
    if raw.is_null() {
        return Err(WindowError::AttributeWriteFailed {
            attribute: label,
            message: "failed to create AXValue".to_string(),
        });
    }
    // SAFETY: raw is a +1 retained AXValueRef we now own.
    let value = unsafe { CFType::wrap_under_create_rule(raw as CFTypeRef) };

    let cf_attr = CFString::new(attribute);
    // SAFETY: Setting attribute value on a valid window element.
    let result = unsafe {
        AXUIElementSetAttributeValue(element, cf_attr.as_concrete_TypeRef(), value.as_CFTypeRef())
    };

    if result != kAXErrorSuccess {
        return Err(WindowError::AttributeWriteFailed {
            attribute: label,
            message: format!("AXError {}", result),
        });
    }
    Ok(())
}

/// Dictionary keys of a CGWindowList entry, wrapped once per enumeration.
struct WindowListKeys {
    number: CFString,
    owner_pid: CFString,
    owner_name: CFString,
    bounds: CFString,
    layer: CFString,
    name: CFString,
    x: CFString,
    y: CFString,
    width: CFString,
    height: CFString,
}

impl WindowListKeys {
    fn new() -> Self {
        // SAFETY: the kCGWindow* keys are immutable framework constants.
        let wrap = |key: CFStringRef| unsafe { CFString::wrap_under_get_rule(key) };
        // SAFETY: reading extern statics exported by CoreGraphics.
        unsafe {
            Self {
                number: wrap(kCGWindowNumber),
                owner_pid: wrap(kCGWindowOwnerPID),
                owner_name: wrap(kCGWindowOwnerName),
                bounds: wrap(kCGWindowBounds),
                layer: wrap(kCGWindowLayer),
                name: wrap(kCGWindowName),
                x: CFString::from_static_string("X"),
                y: CFString::from_static_string("Y"),
                width: CFString::from_static_string("Width"),
                height: CFString::from_static_string("Height"),
            }
        }
    }

    fn read_entry(&self, dict: &CFDictionary<CFString, CFType>) -> ScreenWindow {
        let window_id = number(dict, &self.number)
            .and_then(|n| n.to_i64())
            .and_then(|id| u32::try_from(id).ok());

        let pid = number(dict, &self.owner_pid)
            .and_then(|n| n.to_i64())
            .and_then(|p| {
                i32::try_from(p)
                    .inspect_err(|e| {
                        warn!(
                            event = "core.window.pid_conversion_failed",
                            window_id = ?window_id,
                            pid = p,
                            error = %e,
                        );
                    })
                    .ok()
            });

        let layer = number(dict, &self.layer)
            .and_then(|n| n.to_i64())
            .and_then(|l| i32::try_from(l).ok());

        ScreenWindow {
            window_id,
            pid,
            app_name: string(dict, &self.owner_name),
            bounds: self.read_bounds(dict),
            layer,
            name: string(dict, &self.name),
        }
    }

    fn read_bounds(&self, dict: &CFDictionary<CFString, CFType>) -> Option<Rect> {
        let value = dict.find(&self.bounds)?;
        if value.type_of() != CFDictionary::<CFString, CFType>::type_id() {
            return None;
        }
        // SAFETY: type checked above; get rule retains for the wrapper's lifetime.
        let bounds: CFDictionary<CFString, CFType> =
            unsafe { CFDictionary::wrap_under_get_rule(value.as_CFTypeRef() as CFDictionaryRef) };

        let coord = |key: &CFString| number(&bounds, key).and_then(|n| n.to_f64());
        Some(Rect::from_xywh(
            coord(&self.x)?,
            coord(&self.y)?,
            coord(&self.width)?,
            coord(&self.height)?,
        ))
    }
}

fn number(dict: &CFDictionary<CFString, CFType>, key: &CFString) -> Option<CFNumber> {
    dict.find(key).and_then(|value| value.downcast::<CFNumber>())
}

fn string(dict: &CFDictionary<CFString, CFType>, key: &CFString) -> Option<String> {
    dict.find(key)
        .and_then(|value| value.downcast::<CFString>())
        .map(|s| s.to_string())
}
