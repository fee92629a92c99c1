//! One-shot startup geolocation.

use std::sync::Arc;

use snowcast_weather::{Coordinates, DeviceLocator, LocationError};
use tokio::sync::mpsc::UnboundedSender;

use crate::controller::UiEvent;
use crate::locale::Messages;
use crate::view::View;

/// Set the detecting note and, if a position source exists, request the
/// position once. The answer arrives as [`UiEvent::PositionResolved`].
pub(crate) fn begin<V: View>(
    view: &mut V,
    messages: &Messages,
    locator: Arc<dyn DeviceLocator>,
    events: UnboundedSender<UiEvent>,
) {
    view.set_note(messages.note_detecting());

    if !locator.is_supported() {
        tracing::info!("Geolocation unsupported, waiting for manual entry");
        view.set_note(messages.note_unsupported());
        return;
    }

    tokio::spawn(async move {
        let result = locator.current_position().await;
        let _ = events.send(UiEvent::PositionResolved(result));
    });
}

/// Update the note for a finished position request. Returns the coordinates
/// to fetch weather for, if any.
pub(crate) fn resolved<V: View>(
    view: &mut V,
    messages: &Messages,
    result: Result<Coordinates, LocationError>,
) -> Option<Coordinates> {
    match result {
        Ok(coordinates) => {
            tracing::info!(
                "Device position {}, {}",
                coordinates.latitude,
                coordinates.longitude
            );
            view.set_note(messages.note_located());
            Some(coordinates)
        }
        Err(e) => {
            tracing::info!("Geolocation failed: {}", e);
            view.set_note(messages.note_manual_entry());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::MemoryView;

    #[test]
    fn test_resolved_success_sets_note() {
        let mut view = MemoryView::default();
        let coords = resolved(&mut view, &Messages::default(), Ok(Coordinates::new(1.0, 2.0)));
        assert_eq!(coords, Some(Coordinates::new(1.0, 2.0)));
        assert_eq!(view.note, "Город найден, загружаем погоду...");
    }

    #[test]
    fn test_resolved_failure_prompts_manual_entry() {
        let mut view = MemoryView::default();
        let coords = resolved(
            &mut view,
            &Messages::default(),
            Err(LocationError::PermissionDenied),
        );
        assert!(coords.is_none());
        assert_eq!(view.note, "Введите город вручную");
    }
}
