//! The part of Dear ImGui's IO the bridge writes to

use dear_imgui_rs::{Io, Key};

use crate::host::{Modifiers, MouseButton};

/// Input entry points of the UI library.
///
/// Implemented for [`dear_imgui_rs::Io`]. The bridge only ever talks to this
/// trait, which keeps its event and frame logic testable without a live
/// Dear ImGui context.
pub trait InputSink {
    fn add_key_event(&mut self, key: Key, down: bool);
    fn set_modifiers(&mut self, modifiers: Modifiers);
    fn add_input_character(&mut self, character: char);
    fn add_mouse_wheel(&mut self, delta: [f32; 2]);
    fn add_mouse_pos(&mut self, pos: [f32; 2]);
    fn add_mouse_button(&mut self, button: MouseButton, down: bool);
    fn set_display_size(&mut self, size: [f32; 2]);
    fn set_framebuffer_scale(&mut self, scale: [f32; 2]);
    fn set_delta_time(&mut self, seconds: f32);
}

impl InputSink for Io {
    fn add_key_event(&mut self, key: Key, down: bool) {
        Io::add_key_event(self, key, down);
    }

    fn set_modifiers(&mut self, modifiers: Modifiers) {
        // Left and right variants share one state; hosts do not tell them apart.
        Io::add_key_event(self, Key::LeftCtrl, modifiers.ctrl);
        Io::add_key_event(self, Key::RightCtrl, modifiers.ctrl);
        Io::add_key_event(self, Key::LeftShift, modifiers.shift);
        Io::add_key_event(self, Key::RightShift, modifiers.shift);
        Io::add_key_event(self, Key::LeftAlt, modifiers.alt);
        Io::add_key_event(self, Key::RightAlt, modifiers.alt);
        Io::add_key_event(self, Key::LeftSuper, modifiers.super_key);
        Io::add_key_event(self, Key::RightSuper, modifiers.super_key);
    }

    fn add_input_character(&mut self, character: char) {
        Io::add_input_character(self, character);
    }

    fn add_mouse_wheel(&mut self, delta: [f32; 2]) {
        self.add_mouse_wheel_event(delta);
    }

    fn add_mouse_pos(&mut self, pos: [f32; 2]) {
        self.add_mouse_pos_event(pos);
    }

    fn add_mouse_button(&mut self, button: MouseButton, down: bool) {
        self.add_mouse_button_event(button.to_imgui(), down);
    }

    fn set_display_size(&mut self, size: [f32; 2]) {
        Io::set_display_size(self, size);
    }

    fn set_framebuffer_scale(&mut self, scale: [f32; 2]) {
        self.set_display_framebuffer_scale(scale);
    }

    fn set_delta_time(&mut self, seconds: f32) {
        Io::set_delta_time(self, seconds);
    }
}

impl<S: InputSink + ?Sized> InputSink for &mut S {
    fn add_key_event(&mut self, key: Key, down: bool) {
        (**self).add_key_event(key, down)
    }

    fn set_modifiers(&mut self, modifiers: Modifiers) {
        (**self).set_modifiers(modifiers)
    }

    fn add_input_character(&mut self, character: char) {
        (**self).add_input_character(character)
    }

    fn add_mouse_wheel(&mut self, delta: [f32; 2]) {
        (**self).add_mouse_wheel(delta)
    }

    fn add_mouse_pos(&mut self, pos: [f32; 2]) {
        (**self).add_mouse_pos(pos)
    }

    fn add_mouse_button(&mut self, button: MouseButton, down: bool) {
        (**self).add_mouse_button(button, down)
    }

    fn set_display_size(&mut self, size: [f32; 2]) {
        (**self).set_display_size(size)
    }

    fn set_framebuffer_scale(&mut self, scale: [f32; 2]) {
        (**self).set_framebuffer_scale(scale)
    }

    fn set_delta_time(&mut self, seconds: f32) {
        (**self).set_delta_time(seconds)
    }
}
