use crate::app::DeviceEventSender;
use crate::device::{
    DatePickerOptions, GalleryEntry, ImagePickerOptions, ImageRef, PermissionStatus,
    PickerOutcome,
};
use crate::events::device::Event as DeviceEvent;
use crate::logger::LogBuffer;
use crate::ui::SPINNER_FRAME_COUNT;
use crate::utils::date::today;
use chrono::NaiveDate;
use log::*;
use ratatui::widgets::ListState;
use tui_textarea::CursorMove;

use super::error::StateError;
use super::form::{FormFocus, FormState};
use super::navigation::{Route, Router, ScreenId};
use super::picker::{DatePicker, ImageRequest};
use super::task::{Task, TaskStore};

/// Alert shown when the gallery cannot be read.
///
pub const PERMISSION_ALERT: &str = "Permission to access the image gallery is required.";
const WORKER_UNAVAILABLE: &str = "Image picker is unavailable.";

/// Houses data representative of application state.
///
/// The task store and the draft form belong to the mounted `Home` screen and
/// live exactly as long as this value.
pub struct State {
    device_sender: Option<DeviceEventSender>,
    store: TaskStore,
    form: FormState,
    router: Router,
    date_picker: Option<DatePicker>,
    image_request: Option<ImageRequest>,
    last_request_id: u64,
    media_permission: PermissionStatus,
    alert: Option<String>,
    status_message: Option<String>,
    tasks_list_state: ListState,
    log_buffer: LogBuffer,
    debug_mode: bool,
    debug_index: usize,
    spinner_index: usize,
    theme: crate::ui::Theme,
    clock: fn() -> NaiveDate,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        State {
            device_sender: None,
            store: TaskStore::default(),
            form: FormState::new(today()),
            router: Router::new(ScreenId::Home),
            date_picker: None,
            image_request: None,
            last_request_id: 0,
            media_permission: PermissionStatus::Undetermined,
            alert: None,
            status_message: None,
            tasks_list_state: ListState::default(),
            log_buffer: LogBuffer::default(),
            debug_mode: false,
            debug_index: 0,
            spinner_index: 0,
            theme: crate::ui::Theme::default(),
            clock: today,
        }
    }
}

impl State {
    pub fn new(
        device_sender: DeviceEventSender,
        theme: crate::ui::Theme,
        log_buffer: LogBuffer,
    ) -> Self {
        State {
            device_sender: Some(device_sender),
            theme,
            log_buffer,
            ..State::default()
        }
    }

    /// Mount the home screen: ask the device worker for gallery access.
    ///
    pub fn mount(&mut self) -> &mut Self {
        info!("Mounting {} screen...", self.router.current().screen);
        self.dispatch(DeviceEvent::RequestMediaPermission);
        self
    }

    /// Tear down the home screen, dropping every task and draft value and
    /// closing the device channel.
    ///
    pub fn unmount(&mut self) -> &mut Self {
        info!(
            "Unmounting {} screen with {} task(s)...",
            self.router.current().screen,
            self.store.len()
        );
        self.store = TaskStore::default();
        self.form.reset((self.clock)());
        self.date_picker = None;
        self.image_request = None;
        self.device_sender = None;
        self
    }

    /// Get the current theme.
    ///
    pub fn get_theme(&self) -> &crate::ui::Theme {
        &self.theme
    }

    /// Advance the spinner index.
    ///
    pub fn advance_spinner_index(&mut self) -> &mut Self {
        self.spinner_index += 1;
        if self.spinner_index >= SPINNER_FRAME_COUNT {
            self.spinner_index = 0;
        }
        self
    }

    /// Return the current spinner index.
    ///
    pub fn get_spinner_index(&self) -> usize {
        self.spinner_index
    }

    /// Return the current route.
    ///
    pub fn current_route(&self) -> &Route {
        self.router.current()
    }

    /// Navigate to the given route, reporting unregistered destinations and
    /// routes naming a task that does not exist.
    ///
    pub fn navigate(&mut self, route: Route) -> Result<(), StateError> {
        debug!("Navigating to {:?}...", route);
        if let Some(id) = route.task_id {
            if self.store.get(id).is_none() {
                return Err(StateError::TaskNotFound { id });
            }
        }
        self.router.navigate(route)
    }

    /// Pop back to the previous route. The root screen stays put.
    ///
    pub fn back(&mut self) -> &mut Self {
        match self.router.back() {
            Some(route) => debug!(
                "Left {:?}, {} route(s) remain.",
                route,
                self.router.depth()
            ),
            None => debug!("Already at {} screen.", self.router.current().screen),
        }
        self
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.as_slice()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn current_focus(&self) -> FormFocus {
        self.form.focus()
    }

    pub fn next_focus(&mut self) -> &mut Self {
        self.form.focus_next();
        self.sync_task_selection();
        self
    }

    pub fn previous_focus(&mut self) -> &mut Self {
        self.form.focus_previous();
        self.sync_task_selection();
        self
    }

    pub fn add_form_char(&mut self, c: char) -> &mut Self {
        self.form.push_char(c);
        self
    }

    pub fn remove_form_char(&mut self) -> &mut Self {
        self.form.pop_char();
        self
    }

    pub fn add_form_newline(&mut self) -> &mut Self {
        self.form.push_newline();
        self
    }

    pub fn move_form_cursor(&mut self, movement: CursorMove) -> &mut Self {
        self.form.move_cursor(movement);
        self
    }

    /// Commit the draft as a new task. Blank titles are ignored without user
    /// feedback.
    ///
    pub fn add_task(&mut self) -> &mut Self {
        match self.store.add(self.form.to_new_task()) {
            Ok(task) => {
                info!("Added task {} '{}'.", task.id, task.title);
                self.form.reset((self.clock)());
                self.tasks_list_state
                    .select(Some(self.store.len().saturating_sub(1)));
            }
            Err(e) => debug!("Ignoring add request: {}", e),
        }
        self
    }

    /// Mark the task with the given id as completed.
    ///
    pub fn complete_task(&mut self, id: u64) -> &mut Self {
        if self.store.complete(id) {
            info!("Completed task {}.", id);
        } else {
            debug!("Task {} is missing or already completed.", id);
        }
        self
    }

    /// Remove the task with the given id.
    ///
    pub fn cancel_task(&mut self, id: u64) -> &mut Self {
        if self.store.cancel(id) {
            info!("Cancelled task {}.", id);
            self.sync_task_selection();
        } else {
            debug!("Task {} is missing, nothing to cancel.", id);
        }
        self
    }

    pub fn get_tasks_list_state(&mut self) -> &mut ListState {
        &mut self.tasks_list_state
    }

    /// Return the task under the list cursor.
    ///
    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks_list_state
            .selected()
            .and_then(|index| self.store.as_slice().get(index))
    }

    /// Activate the next task.
    ///
    pub fn next_task_index(&mut self) -> &mut Self {
        let len = self.store.len();
        let next = match self.tasks_list_state.selected() {
            _ if self.store.is_empty() => None,
            Some(i) if i + 1 < len => Some(i + 1),
            _ => Some(0),
        };
        self.tasks_list_state.select(next);
        self
    }

    /// Activate the previous task.
    ///
    pub fn previous_task_index(&mut self) -> &mut Self {
        let len = self.store.len();
        let previous = match self.tasks_list_state.selected() {
            _ if self.store.is_empty() => None,
            Some(i) if i > 0 => Some(i - 1),
            _ => Some(len - 1),
        };
        self.tasks_list_state.select(previous);
        self
    }

    pub fn complete_selected_task(&mut self) -> &mut Self {
        if let Some(id) = self.selected_task().map(|task| task.id) {
            self.complete_task(id);
        }
        self
    }

    pub fn cancel_selected_task(&mut self) -> &mut Self {
        if let Some(id) = self.selected_task().map(|task| task.id) {
            self.cancel_task(id);
        }
        self
    }

    /// Issue the edit intent for the selected task.
    ///
    pub fn open_selected_task(&mut self) -> &mut Self {
        if let Some(id) = self.selected_task().map(|task| task.id) {
            if let Err(e) = self.navigate(Route::edit_task(id)) {
                error!("Failed to open task {}: {}", id, e);
                self.set_status_message(format!("Cannot open task {}: {}", id, e));
            }
        }
        self
    }

    /// Keep the list cursor on an existing row.
    ///
    fn sync_task_selection(&mut self) {
        let len = self.store.len();
        let selected = match self.tasks_list_state.selected() {
            _ if self.store.is_empty() => None,
            Some(i) => Some(i.min(len - 1)),
            None if self.form.focus() == FormFocus::Tasks => Some(0),
            None => None,
        };
        self.tasks_list_state.select(selected);
    }

    /// Show the date picker seeded with the draft date.
    ///
    pub fn select_date(&mut self) -> &mut Self {
        if self.date_picker.is_none() {
            debug!("Opening date picker...");
            self.date_picker = Some(DatePicker::new(
                self.form.date(),
                DatePickerOptions::default(),
            ));
        }
        self
    }

    pub fn is_date_picker_open(&self) -> bool {
        self.date_picker.is_some()
    }

    pub fn get_date_picker(&self) -> Option<&DatePicker> {
        self.date_picker.as_ref()
    }

    pub fn get_date_picker_mut(&mut self) -> Option<&mut DatePicker> {
        self.date_picker.as_mut()
    }

    /// Close the date picker and apply a selected date to the draft.
    ///
    pub fn handle_date_change(&mut self, outcome: PickerOutcome<NaiveDate>) -> &mut Self {
        self.date_picker = None;
        match outcome {
            PickerOutcome::Selected(date) => {
                debug!("Selected date {}.", date);
                self.form.set_date(date);
            }
            PickerOutcome::Dismissed => debug!("Date picker dismissed."),
        }
        self
    }

    pub fn confirm_date_picker(&mut self) -> &mut Self {
        if let Some(date) = self.date_picker.as_ref().map(|picker| picker.date()) {
            self.handle_date_change(PickerOutcome::Selected(date));
        }
        self
    }

    pub fn dismiss_date_picker(&mut self) -> &mut Self {
        if self.date_picker.is_some() {
            self.handle_date_change(PickerOutcome::Dismissed);
        }
        self
    }

    pub fn media_permission(&self) -> PermissionStatus {
        self.media_permission
    }

    /// Record the gallery permission answer, alerting on denial.
    ///
    pub fn set_media_permission(&mut self, status: PermissionStatus) -> &mut Self {
        info!("Gallery permission: {:?}.", status);
        self.media_permission = status;
        if status == PermissionStatus::Denied {
            self.show_alert(PERMISSION_ALERT);
        }
        self
    }

    /// Launch the image picker unless a request is already in flight.
    ///
    pub fn select_image(&mut self) -> &mut Self {
        if self.media_permission == PermissionStatus::Denied {
            warn!("Image picker blocked: gallery permission denied.");
            self.show_alert(PERMISSION_ALERT);
            return self;
        }
        if let Some(request) = &self.image_request {
            warn!(
                "Image picker request {} still in flight, ignoring.",
                request.id()
            );
            return self;
        }
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        let options = ImagePickerOptions::default();
        debug!("Launching image picker request {}...", request_id);
        self.image_request = Some(ImageRequest::new(request_id, options.clone()));
        if !self.dispatch(DeviceEvent::LaunchImageLibrary {
            request_id,
            options,
        }) {
            self.fail_image_request(request_id, WORKER_UNAVAILABLE);
        }
        self
    }

    pub fn get_image_request(&self) -> Option<&ImageRequest> {
        self.image_request.as_ref()
    }

    pub fn is_image_request_in_flight(&self) -> bool {
        self.image_request.is_some()
    }

    /// Show the gallery entries found for the given request.
    ///
    pub fn open_gallery(&mut self, request_id: u64, entries: Vec<GalleryEntry>) -> &mut Self {
        if !self.is_current_request(request_id) {
            debug!("Ignoring gallery for stale request {}.", request_id);
            return self;
        }
        if entries.is_empty() {
            self.fail_image_request(request_id, "No images found in the gallery.");
        } else if let Some(request) = &mut self.image_request {
            request.begin_browsing(entries);
        }
        self
    }

    fn is_current_request(&self, request_id: u64) -> bool {
        self.image_request
            .as_ref()
            .map_or(false, |request| request.id() == request_id)
    }

    pub fn next_gallery_entry(&mut self) -> &mut Self {
        if let Some(request) = &mut self.image_request {
            request.next_entry();
        }
        self
    }

    pub fn previous_gallery_entry(&mut self) -> &mut Self {
        if let Some(request) = &mut self.image_request {
            request.previous_entry();
        }
        self
    }

    /// Pick the highlighted gallery entry and hand it to the worker for
    /// editing.
    ///
    pub fn choose_gallery_entry(&mut self) -> &mut Self {
        let event = match &mut self.image_request {
            Some(request) => match request.selected_entry().map(|entry| entry.path.clone()) {
                Some(source) => {
                    request.begin_editing();
                    Some((
                        request.id(),
                        DeviceEvent::EditImage {
                            request_id: request.id(),
                            source,
                            options: request.options().clone(),
                        },
                    ))
                }
                None => None,
            },
            None => None,
        };
        if let Some((request_id, event)) = event {
            if !self.dispatch(event) {
                self.fail_image_request(request_id, WORKER_UNAVAILABLE);
            }
        }
        self
    }

    /// Dismiss the gallery while browsing.
    ///
    pub fn dismiss_gallery(&mut self) -> &mut Self {
        let browsing = self
            .image_request
            .as_ref()
            .filter(|request| request.is_browsing())
            .map(|request| request.id());
        if let Some(request_id) = browsing {
            self.resolve_image_request(request_id, PickerOutcome::Dismissed);
        }
        self
    }

    /// Resolve the current request as dismissed and show why in the footer.
    /// Stale request ids are ignored.
    ///
    pub fn fail_image_request(&mut self, request_id: u64, message: &str) -> &mut Self {
        if !self.is_current_request(request_id) {
            debug!("Ignoring failure for stale request {}.", request_id);
            return self;
        }
        warn!("Image request {} failed: {}", request_id, message);
        self.set_status_message(message.to_string());
        self.resolve_image_request(request_id, PickerOutcome::Dismissed)
    }

    /// Complete the in-flight image request. A selected image replaces the
    /// draft image; a dismissal leaves it untouched.
    ///
    pub fn resolve_image_request(
        &mut self,
        request_id: u64,
        outcome: PickerOutcome<ImageRef>,
    ) -> &mut Self {
        if !self.is_current_request(request_id) {
            debug!("Ignoring result for stale request {}.", request_id);
            return self;
        }
        self.image_request = None;
        match outcome {
            PickerOutcome::Selected(image) => {
                info!("Attached image {}.", image.file_name());
                self.form.set_image(image);
            }
            PickerOutcome::Dismissed => debug!("Image picker dismissed."),
        }
        self
    }

    pub fn show_alert(&mut self, message: &str) -> &mut Self {
        self.alert = Some(message.to_string());
        self
    }

    pub fn dismiss_alert(&mut self) -> &mut Self {
        self.alert = None;
        self
    }

    pub fn get_alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn set_status_message(&mut self, message: String) -> &mut Self {
        self.status_message = Some(message);
        self
    }

    pub fn get_status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn clear_status_message(&mut self) -> &mut Self {
        self.status_message = None;
        self
    }

    /// Return a snapshot of the captured log entries.
    ///
    pub fn get_debug_entries(&self) -> Vec<String> {
        self.log_buffer.snapshot()
    }

    pub fn is_debug_mode(&self) -> bool {
        self.debug_mode
    }

    /// Enter debug mode with the newest entry selected.
    ///
    pub fn enter_debug_mode(&mut self) -> &mut Self {
        self.debug_mode = true;
        self.debug_index = self.log_buffer.len().saturating_sub(1);
        self
    }

    pub fn exit_debug_mode(&mut self) -> &mut Self {
        self.debug_mode = false;
        self
    }

    pub fn get_debug_index(&self) -> usize {
        self.debug_index
    }

    pub fn next_debug_entry(&mut self) -> &mut Self {
        let len = self.log_buffer.len();
        if self.debug_index + 1 < len {
            self.debug_index += 1;
        }
        self
    }

    pub fn previous_debug_entry(&mut self) -> &mut Self {
        self.debug_index = self.debug_index.saturating_sub(1);
        self
    }

    pub fn get_selected_debug_entry(&self) -> Option<String> {
        self.log_buffer.get(self.debug_index)
    }

    /// Send an event to the device worker. Returns false when the worker has
    /// hung up and the event was dropped.
    ///
    pub fn dispatch(&self, event: DeviceEvent) -> bool {
        match &self.device_sender {
            Some(device_sender) => match device_sender.send(event) {
                Ok(()) => true,
                Err(err) => {
                    error!("Received error from device dispatch: {}", err);
                    false
                }
            },
            None => true,
        }
    }
}
